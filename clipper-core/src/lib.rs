pub mod auth;
pub mod events;
pub mod forms;
pub mod gate;
pub mod mail;
pub mod repository;
pub mod validation;

pub use auth::{CredentialVerifier, SingleAccountVerifier};
pub use events::EventLogger;
pub use forms::{FormHandler, FormSchema, Submission};
pub use gate::{AdminGate, Alert, GateDecision, LoginOutcome, VisitorSession};
pub use mail::{InMemoryMailer, MailNotifier, MailRoute, Mailer, OutboundMail};
pub use repository::{InMemorySink, RecordLog, RecordSink};
pub use validation::{FieldStatus, ValidationReport};

/// Boxed error returned by adapters across the trait seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage failure: {0}")]
    StorageError(String),
    #[error("Mail delivery failed: {0}")]
    MailError(String),
    #[error("Identity verification failed: {0}")]
    IdentityError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
