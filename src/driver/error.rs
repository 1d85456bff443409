use thiserror::Error;

/// Failure talking to, or reported by, the automation driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Driver helper process failed to spawn
    #[error("failed to spawn driver '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// Pipe to the driver broke or returned nothing
    #[error("driver I/O error: {0}")]
    Io(String),

    /// Driver answered `ok: false`
    #[error("driver rejected {command}: {error}")]
    Rejected { command: String, error: String },

    /// Driver answered `ok: true` without the expected payload
    #[error("driver response to {command} has no '{field}'")]
    MissingField {
        command: String,
        field: &'static str,
    },

    #[error("JSON error ({context}): {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    #[error("HTTP error: {0}")]
    Http(String),
}
