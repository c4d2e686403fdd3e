//! Secret handling for store keys and session tokens.

use super::types::{SessionConfig, StoreConfig};

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to the store.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

fn non_empty(value: &Option<String>) -> Option<SecureString> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(|v| SecureString::new(v.to_string()))
}

impl StoreConfig {
    /// The anon key, if one is configured and not blank.
    pub fn anon_key(&self) -> Option<SecureString> {
        non_empty(&self.anon_key)
    }
}

impl SessionConfig {
    pub fn access_token(&self) -> Option<SecureString> {
        non_empty(&self.access_token)
    }
}
