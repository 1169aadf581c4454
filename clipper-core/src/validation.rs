//! Presence checks for submitted forms.
//!
//! A field counts as missing when it is absent or the empty string. Values are
//! never trimmed, so a single space is a valid answer.

use clipper_shared::FormFields;

use crate::forms::FormSchema;

pub const LOOKS_GOOD: &str = "Looks good!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Valid,
    Missing(&'static str),
}

impl FieldStatus {
    pub fn message(&self) -> &'static str {
        match self {
            FieldStatus::Valid => LOOKS_GOOD,
            FieldStatus::Missing(error) => error,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, FieldStatus::Valid)
    }
}

/// Per-field outcome for every known field of a schema, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    statuses: Vec<(&'static str, FieldStatus)>,
}

impl ValidationReport {
    pub fn is_incomplete(&self) -> bool {
        self.statuses.iter().any(|(_, status)| !status.is_valid())
    }

    pub fn status(&self, input: &str) -> Option<FieldStatus> {
        self.statuses
            .iter()
            .find(|(name, _)| *name == input)
            .map(|(_, status)| *status)
    }

    pub fn message(&self, input: &str) -> Option<&'static str> {
        self.status(input).map(|status| status.message())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldStatus)> + '_ {
        self.statuses.iter().copied()
    }
}

fn is_blank(fields: &FormFields, input: &str) -> bool {
    fields.get(input).map_or(true, |value| value.is_empty())
}

/// True if any field the schema knows about is absent or empty.
pub fn is_incomplete(schema: &FormSchema, fields: &FormFields) -> bool {
    schema.fields.iter().any(|spec| is_blank(fields, spec.input))
}

/// Fixed error for each missing known field, "Looks good!" for the rest.
/// Fields the schema does not list are not reported.
pub fn field_messages(schema: &FormSchema, fields: &FormFields) -> ValidationReport {
    let statuses = schema
        .fields
        .iter()
        .map(|spec| {
            let status = if is_blank(fields, spec.input) {
                FieldStatus::Missing(spec.error)
            } else {
                FieldStatus::Valid
            };
            (spec.input, status)
        })
        .collect();

    ValidationReport { statuses }
}
