//! Zeroize-on-drop storage for configured passwords

use std::fmt;

use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

/// A configured password
///
/// The backing buffer is wiped when the secret is dropped, and `Debug`
/// never prints the value.
#[derive(Clone)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Wrap a password
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Whether the password is the empty string
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters, the unit the digit limit is measured in
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Constant-time comparison with a candidate entry
    pub fn matches(&self, candidate: &str) -> bool {
        let secret_bytes = self.0.as_bytes();
        let candidate_bytes = candidate.as_bytes();

        if secret_bytes.len() != candidate_bytes.len() {
            return false;
        }

        constant_time_eq(secret_bytes, candidate_bytes)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}
