use async_trait::async_trait;
use clipper_shared::Masked;

use crate::BoxError;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Check a login attempt. Returns the identity to keep in the session when accepted.
    async fn verify(&self, username: &str, password: &Masked<String>) -> Result<Option<String>, BoxError>;
}

/// Accepts exactly one username/password pair. No hashing, lockout or account store.
pub struct SingleAccountVerifier {
    username: String,
    password: Masked<String>,
}

impl SingleAccountVerifier {
    pub fn new(username: impl Into<String>, password: Masked<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl Default for SingleAccountVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_USERNAME, Masked::from(DEFAULT_ADMIN_PASSWORD))
    }
}

#[async_trait]
impl CredentialVerifier for SingleAccountVerifier {
    async fn verify(&self, username: &str, password: &Masked<String>) -> Result<Option<String>, BoxError> {
        if username == self.username && password.expose() == self.password.expose() {
            Ok(Some(username.to_string()))
        } else {
            Ok(None)
        }
    }
}
