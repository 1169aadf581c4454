use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use clipper_core::GateDecision;

use crate::error::AppError;
use crate::session::Visitor;
use crate::state::AppState;
use crate::templates::{render, LoginTemplate};

/// Identity of the admin the gate let through, available to gated handlers.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub String);

/// Lets authenticated visitors through. Anonymous visitors get the login form
/// instead, and the path they asked for is remembered for after login.
pub async fn admin_gate_middleware(
    State(state): State<AppState>,
    mut visitor: Visitor,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    match state.gate.guard(&mut visitor.context, &path) {
        GateDecision::Allow(identity) => {
            req.extensions_mut().insert(AdminIdentity(identity));
            Ok(next.run(req).await)
        }
        GateDecision::Deny(alert) => {
            visitor.save().await?;
            Ok(render(&LoginTemplate {
                greeting: visitor.greeting(),
                alert: Some(alert),
            })?
            .into_response())
        }
    }
}
