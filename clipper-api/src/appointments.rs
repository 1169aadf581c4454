use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use clipper_core::forms::{FieldSpec, APPOINTMENT, VALIDATED_APPOINTMENT};
use clipper_core::{FormSchema, Submission, ValidationReport};
use clipper_shared::FormFields;
use tracing::info;

use crate::error::AppError;
use crate::session::Visitor;
use crate::state::AppState;
use crate::templates::{render, AppointmentFormTemplate, AppointmentSubmitTemplate, FieldView, OptionView};

pub const BARBERS: &[&str] = &["Bob", "Figaro", "Todd"];

/// Where a booking form posts to and how it is titled.
struct BookingPage {
    schema: &'static FormSchema,
    heading: &'static str,
    action: &'static str,
}

const APPOINTMENT_PAGE: BookingPage = BookingPage {
    schema: &APPOINTMENT,
    heading: "Book an appointment",
    action: "/appointment/submit",
};

const VALIDATION_PAGE: BookingPage = BookingPage {
    schema: &VALIDATED_APPOINTMENT,
    heading: "Book an appointment (server-side validation)",
    action: "/serverside_validation_form/submit",
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/appointment/form", get(appointment_form))
        .route("/appointments/form", get(appointment_form))
        .route("/appointment/submit", post(appointment_submit))
        .route("/appointments/submit", post(appointment_submit))
        .route("/serverside_validation_form", get(validation_form))
        .route("/serverside_validation_form/submit", post(validation_submit))
}

fn input_kind(input: &str) -> &'static str {
    match input {
        "customer_phone" => "tel",
        "appointment_date" => "date",
        "appointment_time" => "time",
        _ => "text",
    }
}

fn field_views(schema: &FormSchema, fields: &FormFields, report: Option<&ValidationReport>) -> Vec<FieldView> {
    schema
        .fields
        .iter()
        .map(|spec: &FieldSpec| {
            let value = fields.get(spec.input).cloned().unwrap_or_default();
            let status = report.and_then(|r| r.status(spec.input));
            let options = if spec.input == "barber" {
                BARBERS
                    .iter()
                    .map(|&name| OptionView {
                        name,
                        selected: name == value,
                    })
                    .collect()
            } else {
                Vec::new()
            };

            FieldView {
                input: spec.input,
                label: spec.label,
                kind: input_kind(spec.input),
                value,
                options,
                status_class: match status {
                    Some(s) if s.is_valid() => "is-valid",
                    Some(_) => "is-invalid",
                    None => "",
                },
                message: status.map(|s| s.message()),
            }
        })
        .collect()
}

fn show_form(page: &BookingPage, visitor: &Visitor, fields: &FormFields, report: Option<&ValidationReport>) -> Result<Html<String>, AppError> {
    render(&AppointmentFormTemplate {
        greeting: visitor.greeting(),
        heading: page.heading,
        action: page.action,
        fields: field_views(page.schema, fields, report),
    })
}

async fn submit(state: &AppState, page: &BookingPage, visitor: &Visitor, fields: FormFields) -> Result<Html<String>, AppError> {
    match state.forms.submit(page.schema, &fields).await? {
        Submission::Rejected(report) => show_form(page, visitor, &fields, Some(&report)),
        Submission::Accepted(entry) => {
            info!("Appointment request {} accepted via {}", entry.timestamp, page.action);
            render(&AppointmentSubmitTemplate {
                greeting: visitor.greeting(),
                title: "Success!",
                timestamp: entry.timestamp,
                details: entry
                    .record
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            })
        }
    }
}

async fn appointment_form(visitor: Visitor) -> Result<Html<String>, AppError> {
    show_form(&APPOINTMENT_PAGE, &visitor, &FormFields::new(), None)
}

async fn appointment_submit(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(fields): Form<FormFields>,
) -> Result<Html<String>, AppError> {
    submit(&state, &APPOINTMENT_PAGE, &visitor, fields).await
}

async fn validation_form(visitor: Visitor) -> Result<Html<String>, AppError> {
    show_form(&VALIDATION_PAGE, &visitor, &FormFields::new(), None)
}

async fn validation_submit(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(fields): Form<FormFields>,
) -> Result<Html<String>, AppError> {
    submit(&state, &VALIDATION_PAGE, &visitor, fields).await
}
