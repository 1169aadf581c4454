use axum::{
    response::Html,
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::session::Visitor;
use crate::state::AppState;
use crate::templates::{
    render, AboutTemplate, ColorPickerResultTemplate, ColorPickerTemplate, ContactsTemplate, HomeTemplate,
    LoremTemplate,
};

const LOREM: &[&str] = &[
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
    "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.",
    "Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur.",
    "Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.",
];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/contacts", get(contacts))
        .route("/contacts/messages", get(contacts))
        .route("/lorem", get(lorem))
        .route("/color_picker_form", get(color_picker_form))
        .route("/color_picker_form/submit", post(color_picker_submit))
}

async fn home(visitor: Visitor) -> Result<Html<String>, AppError> {
    render(&HomeTemplate { greeting: visitor.greeting() })
}

async fn about(visitor: Visitor) -> Result<Html<String>, AppError> {
    render(&AboutTemplate { greeting: visitor.greeting() })
}

async fn contacts(visitor: Visitor) -> Result<Html<String>, AppError> {
    render(&ContactsTemplate { greeting: visitor.greeting() })
}

async fn lorem(visitor: Visitor) -> Result<Html<String>, AppError> {
    render(&LoremTemplate {
        greeting: visitor.greeting(),
        paragraphs: LOREM,
    })
}

async fn color_picker_form(visitor: Visitor) -> Result<Html<String>, AppError> {
    render(&ColorPickerTemplate {
        greeting: visitor.greeting(),
        error: None,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ColorForm {
    color: String,
}

/// `#rrggbb`, the only shape a colour input submits.
fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// Echoes the chosen colour back; nothing is stored.
async fn color_picker_submit(visitor: Visitor, Form(form): Form<ColorForm>) -> Result<Html<String>, AppError> {
    if !is_hex_color(&form.color) {
        return render(&ColorPickerTemplate {
            greeting: visitor.greeting(),
            error: Some("Please pick a colour in #rrggbb form.".to_string()),
        });
    }

    render(&ColorPickerResultTemplate {
        greeting: visitor.greeting(),
        color: form.color,
    })
}
