//! Client configuration.
//!
//! Everything the client needs to talk to a backend comes from `CHAT_*`
//! environment variables. Only the backend URL is required.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

/// Environment variable holding the backend base URL.
pub const ENV_BACKEND_URL: &str = "CHAT_BACKEND_URL";
pub const ENV_REQUEST_TYPE: &str = "CHAT_REQUEST_TYPE";
pub const ENV_PROVIDER: &str = "CHAT_PROVIDER";
pub const ENV_SCHOOL_ID: &str = "CHAT_SCHOOL_ID";
pub const ENV_APP_ID: &str = "CHAT_APP_ID";
pub const ENV_CHAT_TYPE: &str = "CHAT_TYPE";
pub const ENV_HISTORY_LIMIT: &str = "CHAT_HISTORY_LIMIT";
pub const ENV_IDENTITY_PATH: &str = "CHAT_IDENTITY_PATH";

pub const DEFAULT_REQUEST_TYPE: &str = "general";
pub const DEFAULT_PROVIDER: &str = "openai";
pub const DEFAULT_SCHOOL_ID: i64 = 1;
pub const DEFAULT_CHAT_TYPE: i64 = 0;
pub const DEFAULT_HISTORY_LIMIT: u32 = 100;

/// Configuration for the chat client.
///
/// # Example
///
/// ```ignore
/// use chatline::startup::ClientConfig;
///
/// let config = ClientConfig::new("http://localhost:8000")
///     .with_provider("deepseek")
///     .with_history_limit(50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash
    pub backend_url: String,
    /// Subtype label sent as `type` with every message
    pub request_type: String,
    /// Model provider sent with every message
    pub provider: String,
    pub school_id: i64,
    pub app_id: String,
    pub chat_type: i64,
    /// Page size for history fetches
    pub history_limit: u32,
    /// Identity file override; `None` uses the home directory default
    pub identity_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a config for a backend with every other value defaulted.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: normalize_url(&backend_url.into()),
            request_type: DEFAULT_REQUEST_TYPE.to_string(),
            provider: DEFAULT_PROVIDER.to_string(),
            school_id: DEFAULT_SCHOOL_ID,
            app_id: String::new(),
            chat_type: DEFAULT_CHAT_TYPE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            identity_path: None,
        }
    }

    /// Set the request subtype label.
    pub fn with_request_type(mut self, request_type: impl Into<String>) -> Self {
        self.request_type = request_type.into();
        self
    }

    /// Set the model provider.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_school_id(mut self, school_id: i64) -> Self {
        self.school_id = school_id;
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    pub fn with_chat_type(mut self, chat_type: i64) -> Self {
        self.chat_type = chat_type;
        self
    }

    /// Set the history page size.
    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit;
        self
    }

    /// Store the identity at an explicit path.
    pub fn with_identity_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.identity_path = Some(path.into());
        self
    }

    /// Build the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup(ENV_BACKEND_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingBackendUrl)?;

        let mut config = Self::new(backend_url);

        if let Some(value) = lookup(ENV_REQUEST_TYPE).filter(|v| !v.is_empty()) {
            config.request_type = value;
        }
        if let Some(value) = lookup(ENV_PROVIDER).filter(|v| !v.is_empty()) {
            config.provider = value;
        }
        if let Some(value) = lookup(ENV_APP_ID) {
            config.app_id = value;
        }
        if let Some(value) = parse_var(&lookup, ENV_SCHOOL_ID)? {
            config.school_id = value;
        }
        if let Some(value) = parse_var(&lookup, ENV_CHAT_TYPE)? {
            config.chat_type = value;
        }
        if let Some(value) = parse_var(&lookup, ENV_HISTORY_LIMIT)? {
            config.history_limit = value;
        }
        if let Some(value) = lookup(ENV_IDENTITY_PATH).filter(|v| !v.is_empty()) {
            config.identity_path = Some(PathBuf::from(value));
        }

        Ok(config)
    }

    /// Full URL for an API path such as `/api/v1/chat/send`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.backend_url, path)
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}
