use axum::Router;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

pub mod admin;
pub mod appointments;
pub mod auth;
pub mod error;
pub mod messages;
pub mod middleware;
pub mod pages;
pub mod session;
pub mod state;
pub mod templates;

pub use state::{AppState, SessionSettings};

pub fn app(state: AppState) -> Router {
    // Sessions live in process memory and end with the browser session
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_name(state.sessions.cookie_name.clone())
        .with_secure(state.sessions.secure);

    Router::new()
        .merge(pages::routes())
        .merge(appointments::routes())
        .merge(messages::routes())
        .merge(auth::routes())
        .merge(admin::routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(sessions)
        .with_state(state)
}
