//! Admin access gate.
//!
//! A visitor is either Anonymous or Authenticated, depending on whether their
//! session carries an identity. The gate never touches the session store
//! itself: callers load a [`VisitorSession`], let the gate mutate it, and save
//! it back.

use clipper_shared::Masked;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::CredentialVerifier;
use crate::{CoreError, CoreResult};

/// Where a successful login lands when no denied path was recorded.
pub const DEFAULT_LANDING: &str = "/admin";
pub const STRANGER_GREETING: &str = "Hello stranger";

/// Request-scoped view of the two session keys the site uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorSession {
    pub identity: Option<String>,
    pub previous_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Anonymous,
    Authenticated,
}

impl VisitorSession {
    pub fn state(&self) -> GateState {
        match self.identity {
            Some(_) => GateState::Authenticated,
            None => GateState::Anonymous,
        }
    }

    pub fn greeting(&self) -> &str {
        self.identity.as_deref().unwrap_or(STRANGER_GREETING)
    }
}

/// Styled notice rendered above the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub bg_color: &'static str,
    pub font_color: &'static str,
}

impl Alert {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            bg_color: "bg-warning",
            font_color: "text-dark",
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            bg_color: "bg-danger",
            font_color: "text-white",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow(String),
    /// Show the login form with this alert instead of the requested page.
    Deny(Alert),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Redirect(String),
    Rejected(Alert),
}

#[derive(Clone)]
pub struct AdminGate {
    verifier: Arc<dyn CredentialVerifier>,
}

impl AdminGate {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }

    pub fn guard(&self, session: &mut VisitorSession, path: &str) -> GateDecision {
        match &session.identity {
            Some(identity) => GateDecision::Allow(identity.clone()),
            None => {
                info!("Anonymous visit to {} sent to login", path);
                session.previous_url = Some(path.to_string());
                GateDecision::Deny(Alert::warning(format!(
                    "Sorry, in order to visit '{}' you must log in",
                    path
                )))
            }
        }
    }

    /// On success the recorded `previous_url` is consumed; on failure the session is left untouched.
    pub async fn login(
        &self,
        session: &mut VisitorSession,
        username: &str,
        password: &Masked<String>,
    ) -> CoreResult<LoginOutcome> {
        let verified = self
            .verifier
            .verify(username, password)
            .await
            .map_err(|e| CoreError::IdentityError(e.to_string()))?;

        match verified {
            Some(identity) => {
                info!("Admin login for {}", identity);
                session.identity = Some(identity);
                let target = session
                    .previous_url
                    .take()
                    .unwrap_or_else(|| DEFAULT_LANDING.to_string());
                Ok(LoginOutcome::Redirect(target))
            }
            None => {
                warn!("Rejected login attempt for {:?}", username);
                Ok(LoginOutcome::Rejected(Alert::danger("Wrong username or password")))
            }
        }
    }

    pub fn logout(&self, session: &mut VisitorSession) {
        if let Some(identity) = session.identity.take() {
            info!("Logged out {}", identity);
        }
    }
}
