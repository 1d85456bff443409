use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use super::AutomationDriver;
use super::error::DriverError;
use super::protocol::{DriverRequest, DriverResponse};

/// A driver helper running as a child process.
///
/// Requests go out as NDJSON on the helper's stdin and responses come back
/// one line at a time on its stdout. The helper must print
/// `{"ok":true,"ready":true}` once it is able to take commands.
pub struct ProcessDriver {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
    program: String,
}

impl ProcessDriver {
    /// Spawn the helper and wait for its ready signal.
    pub fn launch(program: &str, args: &[String]) -> Result<Self, DriverError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| DriverError::Spawn {
                program: program.to_string(),
                source: e,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| DriverError::Io(format!("failed to capture stdin of {}", program)))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DriverError::Io(format!("failed to capture stdout of {}", program)))?;

        let mut reader = BufReader::new(stdout);
        if let Err(e) = read_ready_signal(&mut reader, program) {
            // Never leave a helper running that did not hand-shake.
            let _ = child.kill();
            let _ = child.wait();
            return Err(e);
        }

        tracing::debug!(program, "driver helper ready");

        Ok(ProcessDriver {
            child,
            stdin,
            reader,
            program: program.to_string(),
        })
    }

    /// Ask the helper to exit and reap it.
    pub fn quit(&mut self) {
        // The helper may already be gone.
        let _ = self.send(&DriverRequest::Quit);
        let _ = self.child.wait();
    }
}

fn read_ready_signal(reader: &mut impl BufRead, program: &str) -> Result<(), DriverError> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| DriverError::Io(format!("failed to read ready signal: {}", e)))?;

    let response: DriverResponse =
        serde_json::from_str(line.trim()).map_err(|e| DriverError::Json {
            context: format!("{} ready signal", program),
            source: e,
        })?;

    if !response.ok || response.ready != Some(true) {
        return Err(DriverError::Rejected {
            command: "launch".into(),
            error: format!("no ready signal from {}", program),
        });
    }
    Ok(())
}

impl AutomationDriver for ProcessDriver {
    fn send(&mut self, request: &DriverRequest) -> Result<DriverResponse, DriverError> {
        let json = serde_json::to_string(request).map_err(|e| DriverError::Json {
            context: format!("{} request", request.name()),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json)
            .and_then(|_| self.stdin.flush())
            .map_err(|e| DriverError::Io(format!("failed to write to {}: {}", self.program, e)))?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| DriverError::Io(format!("failed to read from {}: {}", self.program, e)))?;

        if line.trim().is_empty() {
            return Err(DriverError::Io(format!(
                "empty response from {} (process may have died)",
                self.program
            )));
        }

        serde_json::from_str(line.trim()).map_err(|e| DriverError::Json {
            context: format!("{} response", request.name()),
            source: e,
        })
    }
}

impl Drop for ProcessDriver {
    fn drop(&mut self) {
        self.quit();
    }
}
