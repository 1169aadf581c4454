//! Askama templates for the site.
//!
//! Every page extends `layout.html`, which reads `greeting` from the page
//! struct, so each template carries that field.

use askama::Template;
use axum::response::Html;
use clipper_core::Alert;

use crate::error::AppError;

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub greeting: String,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub greeting: String,
}

#[derive(Template)]
#[template(path = "contacts.html")]
pub struct ContactsTemplate {
    pub greeting: String,
}

#[derive(Template)]
#[template(path = "lorem.html")]
pub struct LoremTemplate {
    pub greeting: String,
    pub paragraphs: &'static [&'static str],
}

/// One input of a booking form, with its last submitted value and feedback.
pub struct FieldView {
    pub input: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub value: String,
    /// Choices when the input is a select, empty for plain inputs.
    pub options: Vec<OptionView>,
    /// `is-valid`/`is-invalid` once the form has been checked, empty before.
    pub status_class: &'static str,
    pub message: Option<&'static str>,
}

pub struct OptionView {
    pub name: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "appointment_form.html")]
pub struct AppointmentFormTemplate {
    pub greeting: String,
    pub heading: &'static str,
    pub action: &'static str,
    pub fields: Vec<FieldView>,
}

#[derive(Template)]
#[template(path = "appointment_submit.html")]
pub struct AppointmentSubmitTemplate {
    pub greeting: String,
    pub title: &'static str,
    pub timestamp: String,
    pub details: Vec<(String, String)>,
}

#[derive(Template)]
#[template(path = "message_form.html")]
pub struct MessageFormTemplate {
    pub greeting: String,
    pub email: String,
    pub message: String,
}

#[derive(Template)]
#[template(path = "message_submit.html")]
pub struct MessageSubmitTemplate {
    pub greeting: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "login_form.html")]
pub struct LoginTemplate {
    pub greeting: String,
    pub alert: Option<Alert>,
}

#[derive(Template)]
#[template(path = "logout.html")]
pub struct LogoutTemplate {
    pub greeting: String,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub greeting: String,
    pub identity: String,
}

#[derive(Template)]
#[template(path = "color_picker_form.html")]
pub struct ColorPickerTemplate {
    pub greeting: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "color_picker_submit.html")]
pub struct ColorPickerResultTemplate {
    pub greeting: String,
    pub color: String,
}
