//! Environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const API_URL_ENV: &str = "FRIDGECHEF_API_URL";
pub const AUTH_TOKEN_ENV: &str = "FRIDGECHEF_AUTH_TOKEN";
pub const REQUEST_TIMEOUT_ENV: &str = "FRIDGECHEF_REQUEST_TIMEOUT_SECS";
pub const REFERENCE_DATA_ENV: &str = "FRIDGECHEF_REFERENCE_DATA";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("FRIDGECHEF_API_URL is not a valid url: {0}")]
    InvalidApiUrl(String),
    #[error("FRIDGECHEF_REQUEST_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: Url,
    pub auth_token: Option<String>,
    pub request_timeout: Duration,
    /// JSON reference tables; the built-in tables are used when unset.
    pub reference_data: Option<PathBuf>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_url = get(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url).map_err(|e| ConfigError::InvalidApiUrl(format!("{raw_url}: {e}")))?;

        let request_timeout = match get(REQUEST_TIMEOUT_ENV) {
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        Ok(Self {
            api_url,
            auth_token: get(AUTH_TOKEN_ENV),
            request_timeout,
            reference_data: get(REFERENCE_DATA_ENV).map(PathBuf::from),
        })
    }

    /// Defaults pointed at `api_url` (tests, ad-hoc tooling).
    pub fn for_url(api_url: Url) -> Self {
        Self {
            api_url,
            auth_token: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            reference_data: None,
        }
    }
}
