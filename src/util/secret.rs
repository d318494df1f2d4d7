//! Shared-secret wrapper used by the bypass rule.
//!
//! Keeps the configured secret out of logs and debug output.

use serde::Deserialize;
use std::fmt;

/// A shared secret that never prints its value.
///
/// `Debug` and `Display` both render `[REDACTED]`, so a `Policy` can be logged
/// with `?policy` without leaking the bypass credential.
///
/// # Example
/// ```
/// use firewall_gate::util::SecretString;
///
/// let secret = SecretString::new("letmein");
/// assert_eq!(format!("{secret:?}"), "[REDACTED]");
/// assert!(secret.matches("letmein"));
/// ```
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap any string-like value.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Explicitly expose the secret value.
    #[inline]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// True when no secret value is held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compare a presented value against the secret.
    ///
    /// An empty secret matches nothing, including an empty candidate.
    pub fn matches(&self, candidate: &str) -> bool {
        !self.0.is_empty() && self.0 == candidate
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // Best-effort only; the value may already have been copied elsewhere.
        self.0.clear();
        self.0.shrink_to_fit();
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString::new)
    }
}
