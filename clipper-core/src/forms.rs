use clipper_shared::{FormFields, LogEntry, SubmissionRecord};
use tracing::debug;

use crate::events::EventLogger;
use crate::repository::RecordLog;
use crate::validation::{field_messages, ValidationReport};
use crate::CoreResult;

/// One known input of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// HTML input name.
    pub input: &'static str,
    /// Key used in the logged record.
    pub record_key: &'static str,
    pub label: &'static str,
    /// Shown when the field is left empty.
    pub error: &'static str,
}

/// Static description of a form: its fields, where it logs, whether it is validated.
#[derive(Debug, Clone, Copy)]
pub struct FormSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
    pub log: RecordLog,
    pub validated: bool,
}

pub const APPOINTMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        input: "customer_name",
        record_key: "name",
        label: "Your name",
        error: "Please enter your name.",
    },
    FieldSpec {
        input: "customer_phone",
        record_key: "phone",
        label: "Phone number",
        error: "Please enter a phone number we can reach you on.",
    },
    FieldSpec {
        input: "appointment_date",
        record_key: "date",
        label: "Date",
        error: "Please choose a date for your appointment.",
    },
    FieldSpec {
        input: "appointment_time",
        record_key: "time",
        label: "Time",
        error: "Please choose a time for your appointment.",
    },
    FieldSpec {
        input: "barber",
        record_key: "barber",
        label: "Barber",
        error: "Please choose a barber.",
    },
];

pub const MESSAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        input: "email",
        record_key: "email",
        label: "Email address",
        error: "Please enter your email address.",
    },
    FieldSpec {
        input: "message",
        record_key: "message",
        label: "Message",
        error: "Please write a message.",
    },
];

pub const APPOINTMENT: FormSchema = FormSchema {
    name: "appointment",
    fields: APPOINTMENT_FIELDS,
    log: RecordLog::Customers,
    validated: true,
};

pub const VALIDATED_APPOINTMENT: FormSchema = FormSchema {
    name: "serverside_validation",
    fields: APPOINTMENT_FIELDS,
    log: RecordLog::CustomersSvf,
    validated: true,
};

pub const CONTACT_MESSAGE: FormSchema = FormSchema {
    name: "contact_message",
    fields: MESSAGE_FIELDS,
    log: RecordLog::Messages,
    validated: false,
};

impl FormSchema {
    /// Copies the known inputs into a record under their record keys.
    /// Absent inputs are left out; values are copied untouched.
    pub fn project(&self, fields: &FormFields) -> SubmissionRecord {
        self.fields
            .iter()
            .filter_map(|spec| fields.get(spec.input).map(|value| (spec.record_key, value.clone())))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Logged; carries the entry that was written.
    Accepted(LogEntry),
    /// Not logged; the form should be shown again with these messages.
    Rejected(ValidationReport),
}

#[derive(Clone)]
pub struct FormHandler {
    logger: EventLogger,
}

impl FormHandler {
    pub fn new(logger: EventLogger) -> Self {
        Self { logger }
    }

    pub async fn submit(&self, schema: &FormSchema, fields: &FormFields) -> CoreResult<Submission> {
        if schema.validated {
            let report = field_messages(schema, fields);
            if report.is_incomplete() {
                debug!("Rejected incomplete {} submission", schema.name);
                return Ok(Submission::Rejected(report));
            }
        }

        Ok(Submission::Accepted(self.log(schema, fields).await?))
    }

    /// Logs the known inputs without any completeness check.
    pub async fn log(&self, schema: &FormSchema, fields: &FormFields) -> CoreResult<LogEntry> {
        self.logger.append(schema.project(fields), schema.log).await
    }
}
