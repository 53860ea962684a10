use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::vault::CredentialRules;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8200";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid endpoint '{value}': {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: Url,
    pub request_timeout: Duration,
    pub copy_indicator: Duration,
    pub clipboard_timeout: Duration,
    pub rules: CredentialRules,
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let log_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("passvault")
            .join("passvault.log");

        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid url"),
            request_timeout: Duration::from_secs(20),
            copy_indicator: Duration::from_millis(2000),
            clipboard_timeout: Duration::from_secs(15),
            rules: CredentialRules::default(),
            log_path,
        }
    }
}

impl AppConfig {
    pub fn with_endpoint(mut self, value: &str) -> Result<Self, ConfigError> {
        self.endpoint = parse_endpoint(value)?;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self, ConfigError> {
        if secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        self.request_timeout = Duration::from_secs(secs);
        Ok(self)
    }
}

/// Absolute http(s) URL with a host. `localhost:8200` parses as scheme
/// `localhost`, so it fails the scheme check.
pub fn parse_endpoint(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidEndpoint {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(value.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }
    Ok(url)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteCredential { id: i64, app: String },
}

impl PendingAction {
    pub fn confirm_message(&self) -> String {
        match self {
            Self::DeleteCredential { app, .. } => format!("Delete the credential for '{}'?", app),
        }
    }
}
