use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// One executed command, as written to the JSONL trace file.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub command: String,

    pub target: Option<String>,

    /// `"ok"` or `"error"`
    pub outcome: String,
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn now(command: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            command: command.to_string(),
            target: None,
            outcome: "ok".to_string(),
            detail: None,
        }
    }

    pub fn with_target(mut self, target: impl ToString) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.outcome = "error".to_string();
        self.detail = Some(error.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
