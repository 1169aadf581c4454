pub mod models;
pub mod pii;

pub use models::records::{FormFields, LogEntry, SubmissionRecord, TIMESTAMP_FORMAT};
pub use pii::Masked;
