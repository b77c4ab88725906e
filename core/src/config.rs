use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

/// Default chat endpoint (the companion server listens on port 8009)
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:8009/chat";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENDPOINT_URL_VAR: &str = "CHATBOX_ENDPOINT_URL";
pub const TIMEOUT_SECS_VAR: &str = "CHATBOX_TIMEOUT_SECS";
/// Log file path; the binaries do not log to the terminal by default
pub const LOG_FILE_VAR: &str = "CHATBOX_LOG_FILE";

/// Settings for reaching the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint_url: Url,
    /// `None` waits forever
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid endpoint URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid timeout `{0}`: expected a whole number of seconds")]
    InvalidTimeout(String),
}

impl ClientConfig {
    /// Config for `url` with the default timeout
    pub fn new(url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint_url: parse_url(url)?,
            request_timeout: timeout_from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load from `CHATBOX_ENDPOINT_URL` and `CHATBOX_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(ENDPOINT_URL_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string());
        let timeout = match lookup(TIMEOUT_SECS_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => timeout_from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self::new(&url)?.with_timeout(timeout))
    }
}

/// Parse and check an endpoint URL; only http and https are accepted
pub fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme `{}`", other),
        }),
    }
}

/// Parse a timeout in seconds; `0` disables the timeout
pub fn parse_timeout(raw: &str) -> Result<Option<Duration>, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(timeout_from_secs)
        .map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))
}

pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
