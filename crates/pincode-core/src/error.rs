//! Error types for PIN-entry configuration

use thiserror::Error;

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, PincodeError>;

/// Errors that can occur while configuring a PIN-entry controller
///
/// Input handling never fails: a digit past the limit, a backspace on an
/// empty entry and a submit without a result handler are all no-ops.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PincodeError {
    /// Rejected setup values; the controller state is left untouched
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl PincodeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        PincodeError::InvalidConfiguration(reason.into())
    }
}
