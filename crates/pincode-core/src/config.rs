//! Controller configuration
//!
//! Deserializable so a host can keep it in a config file next to its own
//! panel settings.

use serde::Deserialize;

use crate::error::{PincodeError, Result};
use crate::secret::Secret;

/// Default maximum entry length
pub const DEFAULT_DIGIT_LIMIT: usize = 4;

fn default_digit_limit() -> usize {
    DEFAULT_DIGIT_LIMIT
}

/// PIN-entry configuration options
#[derive(Clone, Debug, Deserialize)]
pub struct PincodeConfig {
    /// Primary password (required, non-empty)
    pub password: Secret,

    /// Secondary password, only consulted when `backdoor_enabled` is set
    #[serde(default)]
    pub backdoor_password: Option<Secret>,

    /// Maximum entry length in characters
    #[serde(default = "default_digit_limit")]
    pub digit_limit: usize,

    /// Whether the backdoor password is accepted
    #[serde(default)]
    pub backdoor_enabled: bool,

    /// Show mask characters instead of the entered digits
    #[serde(default)]
    pub masking_enabled: bool,
}

impl PincodeConfig {
    /// Create a configuration with the given password and default options
    pub fn new(password: impl Into<Secret>) -> Self {
        Self {
            password: password.into(),
            backdoor_password: None,
            digit_limit: DEFAULT_DIGIT_LIMIT,
            backdoor_enabled: false,
            masking_enabled: false,
        }
    }

    /// Enable the backdoor with the given password
    pub fn with_backdoor(mut self, password: impl Into<Secret>) -> Self {
        self.backdoor_password = Some(password.into());
        self.backdoor_enabled = true;
        self
    }

    /// Set the maximum entry length
    pub fn with_digit_limit(mut self, limit: usize) -> Self {
        self.digit_limit = limit;
        self
    }

    /// Turn masking on or off
    pub fn with_masking(mut self, enabled: bool) -> Self {
        self.masking_enabled = enabled;
        self
    }

    /// Check the options before they are applied
    pub fn validate(&self) -> Result<()> {
        if self.password.is_empty() {
            return Err(PincodeError::invalid("password must not be empty"));
        }

        validate_digit_limit(self.digit_limit)?;

        if self.password.char_len() > self.digit_limit {
            tracing::warn!(
                digit_limit = self.digit_limit,
                "Password is longer than the digit limit and can never match"
            );
        }

        Ok(())
    }
}

pub(crate) fn validate_digit_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(PincodeError::invalid("digit limit must be at least 1"));
    }
    Ok(())
}
