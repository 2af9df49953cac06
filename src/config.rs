use std::{path::PathBuf, time::Duration};

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3010";
pub const DEFAULT_LOG_FILE: &str = "todo-client.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` means requests may hang forever.
    pub request_timeout: Option<Duration>,
    pub log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), request_timeout: None, log_file: PathBuf::from(DEFAULT_LOG_FILE) }
    }
}

impl ClientConfig {
    /// Reads `TODO_API_URL`, `TODO_REQUEST_TIMEOUT_SECS` and `TODO_LOG_FILE`,
    /// after loading a `.env` file if there is one.
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> anyhow::Result<Self> {
        let base_url = normalize_base_url(&lookup("TODO_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))?;
        let request_timeout = match lookup("TODO_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| anyhow::anyhow!("TODO_REQUEST_TIMEOUT_SECS must be a positive integer, got `{raw}`"))?;
                if secs == 0 { anyhow::bail!("TODO_REQUEST_TIMEOUT_SECS must be greater than zero"); }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };
        let log_file = lookup("TODO_LOG_FILE").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        Ok(Self { base_url, request_timeout, log_file })
    }
}

pub fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}
