use async_trait::async_trait;
use clipper_core::{BoxError, Mailer, OutboundMail};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::app_config::MailConfig;

/// Sends notifications through an SMTP relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, lettre::transport::smtp::Error> {
        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        } else {
            // Plain SMTP, e.g. a local catcher in development
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        let mut builder = builder.port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.expose().clone()));
        }

        info!("SMTP relay configured at {}:{}", config.host, config.port);
        Ok(Self {
            transport: builder.build(),
        })
    }
}

fn build_message(mail: &OutboundMail) -> Result<Message, BoxError> {
    let mut builder = Message::builder()
        .from(mail.from.parse()?)
        .to(mail.to.parse()?)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_PLAIN);

    if let Some(reply_to) = &mail.reply_to {
        builder = builder.reply_to(reply_to.parse()?);
    }

    Ok(builder.body(mail.body.clone())?)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn deliver(&self, mail: &OutboundMail) -> Result<(), BoxError> {
        let message = build_message(mail)?;
        let response = self.transport.send(message).await?;
        info!("SMTP relay accepted mail for {} ({})", mail.to, response.code());
        Ok(())
    }

    fn accepts_address(&self, address: &str) -> bool {
        address.parse::<Mailbox>().is_ok()
    }
}

/// Writes notifications to the log instead of sending them.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn deliver(&self, mail: &OutboundMail) -> Result<(), BoxError> {
        info!(
            "Mail delivery disabled, dropping notification to {} (reply-to {:?}): {}",
            mail.to, mail.reply_to, mail.subject
        );
        Ok(())
    }
}
