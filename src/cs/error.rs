//! Error types shared by the coding modules.

use thiserror::Error;

/// Errors raised by the error correction code implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parameter or bit sequence was rejected before any work was done.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
