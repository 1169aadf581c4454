use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use clipper_core::LoginOutcome;
use clipper_shared::Masked;
use serde::Deserialize;

use crate::error::AppError;
use crate::session::Visitor;
use crate::state::AppState;
use crate::templates::{render, LoginTemplate, LogoutTemplate};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: Masked<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login/form", get(login_form))
        .route("/login/attempt", post(login_attempt))
        .route("/logout", get(logout))
}

async fn login_form(visitor: Visitor) -> Result<Html<String>, AppError> {
    render(&LoginTemplate {
        greeting: visitor.greeting(),
        alert: None,
    })
}

async fn login_attempt(
    State(state): State<AppState>,
    mut visitor: Visitor,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.gate.login(&mut visitor.context, &form.username, &form.password).await? {
        LoginOutcome::Redirect(target) => {
            visitor.rotate_id().await?;
            visitor.save().await?;
            Ok(Redirect::to(&target).into_response())
        }
        LoginOutcome::Rejected(alert) => Ok(render(&LoginTemplate {
            greeting: visitor.greeting(),
            alert: Some(alert),
        })?
        .into_response()),
    }
}

async fn logout(State(state): State<AppState>, mut visitor: Visitor) -> Result<Html<String>, AppError> {
    state.gate.logout(&mut visitor.context);
    visitor.save().await?;
    render(&LogoutTemplate {
        greeting: visitor.greeting(),
    })
}
