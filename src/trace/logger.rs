use std::{fmt, fs::OpenOptions, io::Write, sync::Mutex};

use crate::trace::trace::TraceEvent;

/// Diagnostics context handed to every layer that wants to report.
///
/// Holds the debug switch flipped by `start_debug` / `stop_debug` and an
/// optional JSONL file receiving one [`TraceEvent`] per command.
#[derive(Default)]
pub struct TraceContext {
    debug: bool,
    file: Option<Mutex<std::fs::File>>,
}

impl TraceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append trace events to `path`. An unopenable file disables the sink.
    pub fn with_file(mut self, path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => self.file = Some(Mutex::new(f)),
            Err(e) => {
                tracing::warn!(path, error = %e, "could not open trace file");
                self.file = None;
            }
        }
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Emit a debug message, only while debugging is switched on.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if self.debug {
            tracing::debug!("{}", args);
        }
    }

    pub fn record(&self, event: &TraceEvent) {
        let file_mutex = match &self.file {
            Some(f) => f,
            None => return,
        };

        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize trace event");
                return;
            }
        };

        let mut file = match file_mutex.lock() {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(error = %e, "trace file lock poisoned");
                return;
            }
        };

        if let Err(e) = writeln!(file, "{}", json) {
            tracing::warn!(error = %e, "failed to write trace event");
        }
    }
}

impl fmt::Debug for TraceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceContext")
            .field("debug", &self.debug)
            .field("file", &self.file.is_some())
            .finish()
    }
}
