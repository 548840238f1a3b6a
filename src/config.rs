use std::net::SocketAddr;

use dotenvy::dotenv;
use thiserror::Error;
use tracing::Level;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} should be set")]
    Missing(&'static str),
    #[error("LOG_LEVEL '{0}' is not a log level")]
    LogLevel(String),
    #[error("WEBHOOK_ADDR can't be parsed: {0}")]
    WebhookAddr(#[from] std::net::AddrParseError),
    #[error("WEBHOOK_URL can't be parsed: {0}")]
    WebhookUrl(#[from] url::ParseError),
    #[error("WEBHOOK_ADDR and WEBHOOK_URL must be set together")]
    PartialWebhook,
    #[error("{0} should be true or false, got '{1}'")]
    Flag(&'static str, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webhook {
    pub addr: SocketAddr,
    pub url: Url,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub log_level: Level,
    /// Long polling is used when this is `None`.
    pub webhook: Option<Webhook>,
    pub seed_samples: bool,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("TELOXIDE_TOKEN").ok_or(ConfigError::Missing("TELOXIDE_TOKEN"))?;

        let log_level = match lookup("LOG_LEVEL") {
            Some(level) => level
                .parse::<Level>()
                .map_err(|_| ConfigError::LogLevel(level))?,
            None => Level::ERROR,
        };

        let webhook = match (lookup("WEBHOOK_ADDR"), lookup("WEBHOOK_URL")) {
            (Some(addr), Some(url)) => Some(Webhook {
                addr: addr.parse()?,
                url: url.parse()?,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialWebhook),
        };

        let seed_samples = match lookup("SEED_SAMPLES") {
            Some(flag) => parse_flag("SEED_SAMPLES", flag)?,
            None => true,
        };

        Ok(Self {
            token,
            log_level,
            webhook,
            seed_samples,
        })
    }
}

fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Flag(key, value)),
    }
}
