use thiserror::Error;

use crate::driver::error::DriverError;
use crate::element::element_kind::ElementKind;

/// Coarse failure category surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unsupported input (locator, command, argument).
    Validation,
    /// Element, process, file or state could not be found.
    NotFound,
    /// A poll budget ran out.
    Timeout,
    /// The driver or OS refused an action after the target was resolved.
    Execution,
}

#[derive(Debug, Error)]
pub enum NavigatorError {
    /// Locator has an empty final segment
    #[error("no element entered")]
    NoElement,

    /// Final locator segment is not a known element kind
    #[error("unsupported element: {0}")]
    UnsupportedElement(String),

    /// Command name is not in the registry
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Wrong argument shape or value for a command
    #[error("invalid argument for {command}: {reason}")]
    InvalidArgument { command: String, reason: String },

    /// Edge label does not follow `command(args)`
    #[error("malformed action label '{label}': {reason}")]
    MalformedLabel { label: String, reason: String },

    /// Model or repository content could not be parsed
    #[error("invalid {what} '{path}': {reason}")]
    InvalidSource {
        what: &'static str,
        path: String,
        reason: String,
    },

    /// Element never became acquirable
    #[error("element {kind} not found after {attempts} tries (locator: {locator})")]
    ElementNotFound {
        kind: ElementKind,
        locator: String,
        attempts: u32,
    },

    /// Element did not show up before the driver's own timeout
    #[error("element {0} does not exist")]
    ElementMissing(String),

    /// Finish state has no route from start
    #[error("unreachable state: {finish} from {start}")]
    UnreachableState { start: String, finish: String },

    /// Start state is not part of the model
    #[error("unknown state: {0}")]
    UnknownState(String),

    #[error("process {0} is not running")]
    ProcessNotRunning(String),

    /// Model or repository file missing or unreadable
    #[error("cannot read {what} '{path}': {source}")]
    SourceUnreadable {
        what: &'static str,
        path: String,
        source: std::io::Error,
    },

    #[error("timed out after {seconds}s waiting for {what}")]
    Timeout { what: String, seconds: u64 },

    /// Driver action failed after the element was acquired
    #[error("{command} failed: {source}")]
    Driver {
        command: String,
        source: DriverError,
    },

    /// OS-level action (process, script, application) failed
    #[error("{command} failed: {reason}")]
    Execution { command: String, reason: String },
}

impl NavigatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NavigatorError::NoElement
            | NavigatorError::UnsupportedElement(_)
            | NavigatorError::UnknownCommand(_)
            | NavigatorError::InvalidArgument { .. }
            | NavigatorError::MalformedLabel { .. }
            | NavigatorError::InvalidSource { .. } => ErrorKind::Validation,
            NavigatorError::ElementNotFound { .. }
            | NavigatorError::ElementMissing(_)
            | NavigatorError::UnreachableState { .. }
            | NavigatorError::UnknownState(_)
            | NavigatorError::ProcessNotRunning(_)
            | NavigatorError::SourceUnreadable { .. } => ErrorKind::NotFound,
            NavigatorError::Timeout { .. } => ErrorKind::Timeout,
            NavigatorError::Driver { .. } | NavigatorError::Execution { .. } => {
                ErrorKind::Execution
            }
        }
    }

    pub(crate) fn invalid_argument(command: &str, reason: impl Into<String>) -> Self {
        NavigatorError::InvalidArgument {
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn driver(command: &str, source: DriverError) -> Self {
        NavigatorError::Driver {
            command: command.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, NavigatorError>;
