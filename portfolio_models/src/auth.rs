use thiserror::Error;

use crate::macros::sensitive_debug;

/// Shared secret which grants access to the admin endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminKey(String);
sensitive_debug!(AdminKey);

impl AdminKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AdminKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AdminKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdminAuthError {
    /// No admin key was sent with the request.
    #[error("Admin authentication required.")]
    Missing,
    /// The admin key does not match the configured secret.
    #[error("The admin key is invalid.")]
    Invalid,
}
