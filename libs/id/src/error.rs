//! Error types for ID parsing and validation.

use thiserror::Error;

/// Errors that can occur when parsing or validating IDs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The ID string is empty.
    #[error("{kind} ID cannot be empty")]
    Empty { kind: &'static str },

    /// The ID has leading or trailing whitespace.
    #[error("{kind} ID has surrounding whitespace: '{actual}'")]
    SurroundingWhitespace { kind: &'static str, actual: String },

    /// The ID contains a control character.
    #[error("{kind} ID contains a control character")]
    ControlCharacter { kind: &'static str },

    /// The ID exceeds the maximum length.
    #[error("{kind} ID is {len} bytes long (max {max})")]
    TooLong {
        kind: &'static str,
        len: usize,
        max: usize,
    },
}

impl IdError {
    /// Returns true if this error indicates the input was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, IdError::Empty { .. })
    }

    /// The kind of ID that failed to parse.
    pub fn kind(&self) -> &'static str {
        match self {
            IdError::Empty { kind }
            | IdError::SurroundingWhitespace { kind, .. }
            | IdError::ControlCharacter { kind }
            | IdError::TooLong { kind, .. } => kind,
        }
    }
}
