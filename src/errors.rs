//! Error types for the front end.
//!
//! Two kinds of conditions exist: recoverable parse errors, which are
//! recorded as diagnostics while tokenizing/parsing continues, and syntax
//! errors, which the single-item entry points return when the input does
//! not match the requested production.

use thiserror::Error;

use crate::stream::Location;

/// The input did not match the requested top-level production.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{message} at {location}")]
pub struct SyntaxError {
    /// The error message
    pub message: String,
    /// The location of the error
    pub location: Location,
}

impl SyntaxError {
    pub(crate) fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// A recoverable irregularity in the input. The tokenizer or parser emits a
/// substitute token or truncated structure and continues; the diagnostic is
/// kept for the caller to inspect.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    /// The error message
    pub message: String,
    /// The location of the error
    pub location: Location,
}

/// Collects parse errors during a run. Duplicate reports for the same
/// position and message are dropped.
#[derive(Default)]
pub struct ErrorLogger {
    errors: Vec<ParseError>,
}

impl ErrorLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, location: Location, message: &str) {
        for err in &self.errors {
            if err.location == location && err.message == message {
                return;
            }
        }

        log::trace!("parse error: {} at {}", message, location);

        self.errors.push(ParseError {
            message: message.to_string(),
            location,
        });
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn take(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }
}
