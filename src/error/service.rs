//! Errors from the plain request/response endpoints.

use thiserror::Error;

use crate::traits::HttpError;

/// Errors from create, list and history calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request did not complete or returned a non-success status.
    #[error("{0}")]
    Http(#[from] HttpError),

    /// The backend answered with `ok: false`.
    #[error("{operation} rejected: {message}")]
    Rejected { operation: String, message: String },

    /// The response body did not have the expected shape.
    #[error("{operation} returned an unreadable response: {message}")]
    Decode { operation: String, message: String },
}

impl ServiceError {
    /// Check if the request failed before the backend answered.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ServiceError::Http(
                HttpError::ConnectionFailed(_) | HttpError::Timeout(_) | HttpError::Io(_)
            )
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Http(HttpError::ServerError { status, .. }) => {
                format!("The chat service answered with status {}.", status)
            }
            ServiceError::Http(_) => "Could not reach the chat service.".to_string(),
            ServiceError::Rejected { operation, message } => {
                format!("Could not {}: {}", operation, message)
            }
            ServiceError::Decode { operation, .. } => {
                format!("Could not {}: unexpected response.", operation)
            }
        }
    }
}
