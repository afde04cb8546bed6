//! Core error types

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Text that does not name a valid identifier
    #[error("Invalid identifier '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: String },
}

impl CoreError {
    pub fn invalid_identifier(input: impl Into<String>, reason: impl ToString) -> Self {
        CoreError::InvalidIdentifier {
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}
