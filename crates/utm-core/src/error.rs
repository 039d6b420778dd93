//! Core error type.

use utm_events::ParseMoveError;

/// Errors raised by the estimator, the reward adapter and strategies.
///
/// Every variant is a caller precondition violation. Nothing in the core
/// retries or substitutes defaults; errors reach the caller unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UtmError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl UtmError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        UtmError::InvalidArgument(msg.into())
    }
}

impl From<ParseMoveError> for UtmError {
    fn from(_: ParseMoveError) -> Self {
        UtmError::invalid("move must be 'C' or 'D'")
    }
}

pub type Result<T> = std::result::Result<T, UtmError>;
