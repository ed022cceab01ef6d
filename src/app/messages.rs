//! AppMessage enum for async communication within the application.

use crate::error::{ServiceError, StreamError};
use crate::models::HistoryEntry;

/// Messages received from spawned stream and history tasks.
///
/// Every message carries the session id that was active when its task
/// started, so results for a session the user has left can be dropped.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Accumulated assistant text after a delta
    StreamUpdate {
        session_id: String,
        request_id: String,
        content: String,
    },
    /// The stream failed. A `StreamFinished` with the error text follows.
    StreamFailed {
        session_id: String,
        request_id: String,
        error: StreamError,
    },
    /// Final text of a stream. Sent exactly once per request.
    StreamFinished {
        session_id: String,
        request_id: String,
        content: String,
    },
    /// Stored messages of a session, in server order
    HistoryLoaded {
        session_id: String,
        entries: Vec<HistoryEntry>,
    },
    /// Fetching the stored messages failed
    HistoryFailed {
        session_id: String,
        error: ServiceError,
    },
}

impl AppMessage {
    /// Session the originating task was started for.
    pub fn session_id(&self) -> &str {
        match self {
            AppMessage::StreamUpdate { session_id, .. }
            | AppMessage::StreamFailed { session_id, .. }
            | AppMessage::StreamFinished { session_id, .. }
            | AppMessage::HistoryLoaded { session_id, .. }
            | AppMessage::HistoryFailed { session_id, .. } => session_id,
        }
    }
}

/// Id of the user message created by a request.
pub fn user_message_id(request_id: &str) -> String {
    format!("{}:user", request_id)
}

/// Id of the assistant message a request streams into.
pub fn assistant_message_id(request_id: &str) -> String {
    format!("{}:assistant", request_id)
}
