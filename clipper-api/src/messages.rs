use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use clipper_core::forms::CONTACT_MESSAGE;
use clipper_shared::FormFields;

use crate::error::AppError;
use crate::session::Visitor;
use crate::state::AppState;
use crate::templates::{render, MessageFormTemplate, MessageSubmitTemplate};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contacts/messages/form", get(message_form))
        .route("/contacts/message/submit", post(message_submit))
        .route("/contacts/messages/submit", post(message_submit))
}

fn field(fields: &FormFields, name: &str) -> String {
    fields.get(name).cloned().unwrap_or_default()
}

async fn message_form(visitor: Visitor) -> Result<Html<String>, AppError> {
    render(&MessageFormTemplate {
        greeting: visitor.greeting(),
        email: String::new(),
        message: String::new(),
    })
}

/// Logs the message as given, then relays it to the shop mailbox.
async fn message_submit(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(fields): Form<FormFields>,
) -> Result<Html<String>, AppError> {
    let entry = state.forms.log(&CONTACT_MESSAGE, &fields).await?;
    state.notifier.notify(&entry.record).await?;
    render(&MessageSubmitTemplate {
        greeting: visitor.greeting(),
        email: field(&fields, "email"),
    })
}
