//! Error types and the fatal contract-violation helper.

use std::{panic::Location, result::Result as StdResult};

use thiserror::Error;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Parse error for textual selector patterns.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
#[error("{message}")]
pub struct ParseError {
    /// Parse error message, optionally including location.
    message: String,
}

impl ParseError {
    /// Construct a parse error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Construct a parse error with optional line/offset information.
    pub fn with_position(
        message: impl Into<String>,
        line: Option<usize>,
        offset: Option<usize>,
    ) -> Self {
        let message = message.into();
        let message = match (line, offset) {
            (Some(line), Some(offset)) => format!("{message} (line {line}, offset {offset})"),
            (Some(line), None) => format!("{message} (line {line})"),
            (None, Some(offset)) => format!("{message} (offset {offset})"),
            (None, None) => message,
        };
        Self { message }
    }
}

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// An arena request larger than any chunk the arena may reserve.
    #[error("arena: request of {requested} bytes exceeds chunk limit of {limit} bytes")]
    ArenaExhausted {
        /// Requested size in bytes, including alignment padding.
        requested: usize,
        /// Largest chunk the arena may reserve.
        limit: usize,
    },

    /// The base allocator refused a reservation.
    #[error("arena: base allocator failed to reserve {0} bytes")]
    Reserve(usize),

    /// Every scratch arena on this thread is checked out or conflicts.
    #[error("scratch: no free scratch arena on this thread")]
    ScratchUnavailable,

    /// A begin/end pair on one of the UI stacks did not match.
    #[error("stack: {0}")]
    Stack(String),

    /// A frame operation was called out of order.
    #[error("frame: {0}")]
    Frame(String),

    /// Invalid configuration value.
    #[error("config: {0}")]
    Config(String),

    /// Parsing failure.
    #[error("parse error: {0}")]
    Parse(#[source] ParseError),

    /// No UI context is entered on this thread.
    #[error("no current ui context")]
    NoContext,

    /// The entered UI context is already borrowed further up the stack.
    #[error("ui context is already borrowed")]
    ContextBusy,
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Abort on a usage-contract violation. These are programming errors in the
/// calling code, so the panic message carries the caller's location.
#[track_caller]
#[cold]
pub fn fatal(err: Error) -> ! {
    let location = Location::caller();
    tracing::error!(%location, "{err}");
    panic!("{err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_positions() {
        assert_eq!(
            ParseError::with_position("bad", Some(1), Some(4)).to_string(),
            "bad (line 1, offset 4)"
        );
        assert_eq!(
            ParseError::with_position("bad", None, Some(4)).to_string(),
            "bad (offset 4)"
        );
        let e: Error = ParseError::new("oops").into();
        assert_eq!(e.to_string(), "parse error: oops");
    }

    #[test]
    #[should_panic(expected = "stack: unbalanced")]
    fn fatal_panics_with_message() {
        fatal(Error::Stack("unbalanced".into()));
    }
}
