pub mod app_config;
pub mod jsonl;
pub mod mailer;

pub use jsonl::JsonlSink;
pub use mailer::{LogMailer, SmtpMailer};
