//! Configuration errors.

use thiserror::Error;

/// Errors raised while building the client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The backend base URL was not provided.
    #[error("CHAT_BACKEND_URL is not set")]
    MissingBackendUrl,

    /// A value could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::MissingBackendUrl => {
                "No backend configured. Set CHAT_BACKEND_URL to the chat server address.".to_string()
            }
            ConfigError::InvalidValue { key, value } => {
                format!("{} has an invalid value '{}'.", key, value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ConfigError::MissingBackendUrl.to_string(),
            "CHAT_BACKEND_URL is not set"
        );
        assert_eq!(
            ConfigError::InvalidValue {
                key: "CHAT_SCHOOL_ID".to_string(),
                value: "abc".to_string()
            }
            .to_string(),
            "Invalid value for CHAT_SCHOOL_ID: \"abc\""
        );
    }
}
