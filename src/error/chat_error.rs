//! Unified error type for the chat client.

use thiserror::Error;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::service::ServiceError;
use super::stream::StreamError;
use crate::traits::IdentityError;

/// Unified error type for the chat client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// Startup configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Stream session errors.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Create, list and history call errors.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Identity storage errors.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl ChatError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Config(_) => ErrorCategory::Configuration,
            ChatError::Stream(StreamError::Protocol { .. }) => ErrorCategory::Protocol,
            ChatError::Stream(_) => ErrorCategory::Network,
            ChatError::Service(err) if err.is_network() => ErrorCategory::Network,
            ChatError::Service(_) => ErrorCategory::Service,
            ChatError::Identity(_) => ErrorCategory::System,
        }
    }

    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Config(err) => err.user_message(),
            ChatError::Stream(err) => err.user_message(),
            ChatError::Service(err) => err.user_message(),
            ChatError::Identity(err) => format!("Could not access the stored identity: {}", err),
        }
    }
}
