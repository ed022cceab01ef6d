//! Streaming-related error types.
//!
//! Errors that end a stream session. The session reports each of them once
//! through its observer and then hands the display text over as terminal
//! content.

use thiserror::Error;

use crate::sse::SseParseError;
use crate::traits::HttpError;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The send request failed or returned a non-success status.
    /// Nothing was decoded.
    #[error("{}", transport_display(*status, message))]
    Transport { status: Option<u16>, message: String },

    /// The response carried no body to stream.
    #[error("Stream response has no body")]
    EmptyBody,

    /// Reading the body failed mid-stream.
    #[error("Stream read failed: {message}")]
    Read { message: String },

    /// A frame could not be interpreted.
    #[error("Invalid {event_type} event: {message}")]
    Protocol { event_type: String, message: String },
}

fn transport_display(status: Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("HTTP error! status: {} {}", status, message)
            .trim_end()
            .to_string(),
        None => format!("Request failed: {}", message),
    }
}

impl StreamError {
    /// Check if this error happened before any body was decoded.
    pub fn is_transport(&self) -> bool {
        matches!(self, StreamError::Transport { .. } | StreamError::EmptyBody)
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::Transport {
                status: Some(401 | 403),
                ..
            } => "The server rejected the access token. Set a new one with /token.".to_string(),
            StreamError::Transport {
                status: Some(status),
                ..
            } => format!("The server answered with status {}. Please try again.", status),
            StreamError::Transport { status: None, .. } => {
                "Could not reach the chat server.".to_string()
            }
            StreamError::EmptyBody => "The server returned an empty response.".to_string(),
            StreamError::Read { .. } => {
                "The connection dropped while the answer was streaming.".to_string()
            }
            StreamError::Protocol { event_type, .. } => {
                format!("Received an unreadable '{}' message from the server.", event_type)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Transport { .. } => "E_STREAM_TRANSPORT",
            StreamError::EmptyBody => "E_STREAM_EMPTY",
            StreamError::Read { .. } => "E_STREAM_READ",
            StreamError::Protocol { .. } => "E_STREAM_PROTOCOL",
        }
    }

    /// Map a read failure observed after the body started.
    pub fn read(err: HttpError) -> Self {
        StreamError::Read {
            message: err.to_string(),
        }
    }
}

/// Failures while opening the stream.
impl From<HttpError> for StreamError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, message } => StreamError::Transport {
                status: Some(status),
                message,
            },
            HttpError::EmptyBody => StreamError::EmptyBody,
            other => StreamError::Transport {
                status: None,
                message: other.to_string(),
            },
        }
    }
}

impl From<SseParseError> for StreamError {
    fn from(err: SseParseError) -> Self {
        StreamError::Protocol {
            event_type: err.event_type().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_server_error() {
        let err: StreamError = HttpError::ServerError {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(
            err,
            StreamError::Transport {
                status: Some(500),
                message: "boom".to_string()
            }
        );
        assert_eq!(err.to_string(), "HTTP error! status: 500 boom");
        assert!(err.is_transport());
    }

    #[test]
    fn test_transport_display_without_body() {
        let err = StreamError::Transport {
            status: Some(502),
            message: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 502");
    }

    #[test]
    fn test_from_http_empty_body() {
        let err: StreamError = HttpError::EmptyBody.into();
        assert_eq!(err, StreamError::EmptyBody);
    }

    #[test]
    fn test_from_http_connection_failure() {
        let err: StreamError = HttpError::ConnectionFailed("refused".to_string()).into();
        assert!(matches!(err, StreamError::Transport { status: None, .. }));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_read_error() {
        let err = StreamError::read(HttpError::Io("reset".to_string()));
        assert!(!err.is_transport());
        assert_eq!(err.error_code(), "E_STREAM_READ");
    }

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = vec![
            StreamError::Transport {
                status: Some(401),
                message: String::new(),
            },
            StreamError::EmptyBody,
            StreamError::Read {
                message: "x".to_string(),
            },
            StreamError::Protocol {
                event_type: "delta".to_string(),
                message: "x".to_string(),
            },
        ];
        for err in errors {
            assert!(!err.user_message().is_empty());
        }
    }
}
