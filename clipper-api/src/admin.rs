use axum::{response::Html, routing::get, Extension, Router};

use crate::error::AppError;
use crate::middleware::{admin_gate_middleware, AdminIdentity};
use crate::state::AppState;
use crate::templates::{render, AdminTemplate};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_view))
        .route_layer(axum::middleware::from_fn_with_state(state, admin_gate_middleware))
}

/// GET /admin, only reached once the gate has let the visitor through.
async fn admin_view(Extension(AdminIdentity(identity)): Extension<AdminIdentity>) -> Result<Html<String>, AppError> {
    render(&AdminTemplate {
        greeting: identity.clone(),
        identity,
    })
}
