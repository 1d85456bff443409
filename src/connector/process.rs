use std::process::{Command, Output, Stdio};

use serde::Serialize;

use crate::error::{NavigatorError, Result};

/// Captured output of a script run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Operating-system process table access.
pub trait ProcessControl {
    /// Whether a process whose name contains `name` is running.
    fn is_running(&self, name: &str) -> Result<bool>;

    /// Terminate every process called `name`. `Ok(false)` means the OS
    /// refused.
    fn kill(&self, name: &str) -> Result<bool>;
}

impl<P: ProcessControl + ?Sized> ProcessControl for Box<P> {
    fn is_running(&self, name: &str) -> Result<bool> {
        (**self).is_running(name)
    }

    fn kill(&self, name: &str) -> Result<bool> {
        (**self).kill(name)
    }
}

/// `tasklist` / `taskkill` on Windows, `ps` / `pkill` elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessControl;

impl ProcessControl for SystemProcessControl {
    fn is_running(&self, name: &str) -> Result<bool> {
        let output = if cfg!(windows) {
            capture("check_if_process_is_running", "tasklist", &[])?
        } else {
            capture("check_if_process_is_running", "ps", &["-A", "-o", "comm="])?
        };
        Ok(String::from_utf8_lossy(&output.stdout).contains(name))
    }

    fn kill(&self, name: &str) -> Result<bool> {
        if cfg!(windows) {
            let output = capture("kill_process", "taskkill", &["/im", name, "/f"])?;
            Ok(String::from_utf8_lossy(&output.stdout).contains("SUCCESS"))
        } else {
            let output = capture("kill_process", "pkill", &["-x", name])?;
            Ok(output.status.success())
        }
    }
}

fn capture(command: &str, program: &str, args: &[&str]) -> Result<Output> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| NavigatorError::Execution {
            command: command.to_string(),
            reason: format!("cannot run {}: {}", program, e),
        })
}

/// Run a script to completion and collect what it printed.
///
/// `params` is passed through as a single argument. A non-zero exit status
/// is not an error; callers inspect `stderr`.
pub fn run_script(path: &str, params: Option<&str>) -> Result<ScriptOutput> {
    let command = if params.is_some() {
        "run_script_with_parameters"
    } else {
        "run_script"
    };

    let mut process = Command::new(path);
    if let Some(params) = params {
        process.arg(params);
    }

    let output = process
        .stdin(Stdio::null())
        .output()
        .map_err(|e| NavigatorError::Execution {
            command: command.to_string(),
            reason: format!("cannot run {}: {}", path, e),
        })?;

    tracing::debug!(path, status = %output.status, "script finished");

    Ok(ScriptOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
