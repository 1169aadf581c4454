use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clipper_api::{app, AppState, SessionSettings};
use clipper_core::{MailRoute, Mailer, SingleAccountVerifier};
use clipper_store::{app_config::Config, JsonlSink, LogMailer, SmtpMailer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clipper_api=debug,clipper_core=info,clipper_store=info,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Clipper on port {}", config.server.port);

    // Append-only logs
    let sink = JsonlSink::new(&config.storage.log_dir);
    tokio::fs::create_dir_all(sink.dir())
        .await
        .with_context(|| format!("Failed to create log directory {}", sink.dir().display()))?;

    let verifier = SingleAccountVerifier::new(config.admin.username.clone(), config.admin.password.clone());

    let mailer: Arc<dyn Mailer> = if config.mail.enabled {
        Arc::new(SmtpMailer::new(&config.mail).context("Failed to configure SMTP relay")?)
    } else {
        tracing::info!("Mail delivery disabled, notifications will only be logged");
        Arc::new(LogMailer)
    };

    let app_state = AppState::new(
        Arc::new(sink),
        Arc::new(verifier),
        mailer,
        MailRoute {
            from: config.mail.from.clone(),
            to: config.mail.to.clone(),
        },
        SessionSettings {
            cookie_name: config.session.cookie_name.clone(),
            secure: config.session.secure,
        },
    );

    let app = app(app_state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
