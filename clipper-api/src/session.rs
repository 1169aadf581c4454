use axum::{extract::FromRequestParts, http::request::Parts};
use clipper_core::VisitorSession;
use tower_sessions::Session;

use crate::error::AppError;

pub const IDENTITY_KEY: &str = "identity";
pub const PREVIOUS_URL_KEY: &str = "previous_url";

/// The visitor's session state, loaded once per request.
///
/// Handlers mutate `context` and call [`Visitor::save`]; nothing is written
/// back to the session store implicitly.
pub struct Visitor {
    session: Session,
    loaded: VisitorSession,
    pub context: VisitorSession,
}

impl Visitor {
    pub async fn load(session: Session) -> Result<Self, AppError> {
        let context = VisitorSession {
            identity: session.get::<String>(IDENTITY_KEY).await?,
            previous_url: session.get::<String>(PREVIOUS_URL_KEY).await?,
        };

        Ok(Self {
            session,
            loaded: context.clone(),
            context,
        })
    }

    pub fn greeting(&self) -> String {
        self.context.greeting().to_string()
    }

    /// Issues a fresh session id, keeping the data. Called when privileges change.
    pub async fn rotate_id(&self) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        Ok(())
    }

    /// Writes back the keys that changed since the request started.
    pub async fn save(&mut self) -> Result<(), AppError> {
        if self.context.identity != self.loaded.identity {
            store(&self.session, IDENTITY_KEY, &self.context.identity).await?;
        }
        if self.context.previous_url != self.loaded.previous_url {
            store(&self.session, PREVIOUS_URL_KEY, &self.context.previous_url).await?;
        }
        self.loaded = self.context.clone();
        Ok(())
    }
}

async fn store(session: &Session, key: &str, value: &Option<String>) -> Result<(), tower_sessions::session::Error> {
    match value {
        Some(value) => session.insert(key, value).await,
        None => session.remove::<String>(key).await.map(|_| ()),
    }
}

impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::InternalServerError(msg.to_string()))?;

        Visitor::load(session).await
    }
}
