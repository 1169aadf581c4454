use clipper_shared::Masked;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the `.jsonl` logs.
    pub log_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Only send the session cookie over HTTPS.
    #[serde(default)]
    pub secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: Masked<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: clipper_core::auth::DEFAULT_ADMIN_USERNAME.to_string(),
            password: Masked::from(clipper_core::auth::DEFAULT_ADMIN_PASSWORD),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    /// When off, notifications only go to the log.
    #[serde(default)]
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub starttls: bool,
    pub username: Option<String>,
    pub password: Option<Masked<String>>,
    pub from: String,
    pub to: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from(Path::new("config"), &run_mode)
    }

    /// Layers `default`, then `<run_mode>`, then `local` from `dir`, then `CLIPPER__*` variables.
    pub fn load_from(dir: &Path, run_mode: &str) -> Result<Self, config::ConfigError> {
        let source = |name: &str| dir.join(name).to_string_lossy().into_owned();

        let s = config::Config::builder()
            .add_source(config::File::with_name(&source("default")))
            // Per-profile overrides, e.g. production mail relay
            .add_source(config::File::with_name(&source(run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&source("local")).required(false))
            .add_source(config::Environment::with_prefix("CLIPPER").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
