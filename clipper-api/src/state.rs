use std::sync::Arc;
use clipper_core::{
    AdminGate, CredentialVerifier, EventLogger, FormHandler, MailNotifier, MailRoute, Mailer, RecordSink,
};

#[derive(Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub secure: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub forms: FormHandler,
    pub gate: AdminGate,
    pub notifier: MailNotifier,
    pub sessions: SessionSettings,
}

impl AppState {
    pub fn new(
        sink: Arc<dyn RecordSink>,
        verifier: Arc<dyn CredentialVerifier>,
        mailer: Arc<dyn Mailer>,
        route: MailRoute,
        sessions: SessionSettings,
    ) -> Self {
        Self {
            forms: FormHandler::new(EventLogger::new(sink)),
            gate: AdminGate::new(verifier),
            notifier: MailNotifier::new(mailer, route),
            sessions,
        }
    }
}
