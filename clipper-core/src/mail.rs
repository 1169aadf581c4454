use async_trait::async_trait;
use clipper_shared::SubmissionRecord;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

use crate::{BoxError, CoreError, CoreResult};

/// Fixed sender and recipient for notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRoute {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMail {
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
}

/// Builds the notification for a contact message.
///
/// The submitter's email only becomes the reply-to when `accepts_address` takes it;
/// otherwise the mail goes out as coming from an anonymous visitor.
pub fn compose_notification(
    record: &SubmissionRecord,
    route: &MailRoute,
    accepts_address: impl Fn(&str) -> bool,
) -> OutboundMail {
    let reply_to = record
        .get("email")
        .filter(|email| !email.is_empty() && accepts_address(*email))
        .map(str::to_string);

    let subject = match &reply_to {
        Some(email) => format!("New message from {}", email),
        None => "New message from a website visitor".to_string(),
    };

    OutboundMail {
        from: route.from.clone(),
        to: route.to.clone(),
        reply_to,
        subject,
        body: record.get("message").unwrap_or_default().to_string(),
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn deliver(&self, mail: &OutboundMail) -> Result<(), BoxError>;

    /// Whether `address` can be used as a reply-to by this transport.
    fn accepts_address(&self, address: &str) -> bool {
        !address.is_empty()
    }
}

/// Collects mail instead of sending it.
#[derive(Default)]
pub struct InMemoryMailer {
    outbox: Mutex<Vec<OutboundMail>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outbox(&self) -> Vec<OutboundMail> {
        self.outbox.lock().map(|mail| mail.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn deliver(&self, mail: &OutboundMail) -> Result<(), BoxError> {
        self.outbox
            .lock()
            .map_err(|_| "in-memory outbox poisoned")?
            .push(mail.clone());
        Ok(())
    }
}

/// Relays contact messages to the shop mailbox.
#[derive(Clone)]
pub struct MailNotifier {
    mailer: Arc<dyn Mailer>,
    route: MailRoute,
}

impl MailNotifier {
    pub fn new(mailer: Arc<dyn Mailer>, route: MailRoute) -> Self {
        Self { mailer, route }
    }

    pub async fn notify(&self, record: &SubmissionRecord) -> CoreResult<OutboundMail> {
        let mail = compose_notification(record, &self.route, |address| {
            let accepted = self.mailer.accepts_address(address);
            if !accepted {
                warn!("Dropping unusable reply-to address {:?}", address);
            }
            accepted
        });

        self.mailer.deliver(&mail).await.map_err(|e| {
            error!("Failed to deliver notification to {}: {}", mail.to, e);
            CoreError::MailError(e.to_string())
        })?;

        info!("Notification sent to {}: {}", mail.to, mail.subject);
        Ok(mail)
    }
}
