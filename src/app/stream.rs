//! Submitting input and bridging stream sessions to the app channel.

use tokio::sync::mpsc;

use super::messages::{assistant_message_id, user_message_id};
use super::{AppMessage, ChatApp};
use crate::error::{ServiceError, StreamError};
use crate::models::{Message, SessionId};
use crate::stream::{StreamObserver, StreamRequest, StreamSession};

/// Observer that forwards stream progress as [`AppMessage`]s.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<AppMessage>,
    session_id: String,
    request_id: String,
}

impl ChannelObserver {
    pub fn new(
        tx: mpsc::UnboundedSender<AppMessage>,
        session_id: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            tx,
            session_id: session_id.into(),
            request_id: request_id.into(),
        }
    }

    fn send(&self, message: AppMessage) {
        // Receiver gone means the app is shutting down
        let _ = self.tx.send(message);
    }
}

impl StreamObserver for ChannelObserver {
    fn on_update(&mut self, content: &str) {
        self.send(AppMessage::StreamUpdate {
            session_id: self.session_id.clone(),
            request_id: self.request_id.clone(),
            content: content.to_string(),
        });
    }

    fn on_success(&mut self, content: &str) {
        self.send(AppMessage::StreamFinished {
            session_id: self.session_id.clone(),
            request_id: self.request_id.clone(),
            content: content.to_string(),
        });
    }

    fn on_error(&mut self, error: &StreamError) {
        self.send(AppMessage::StreamFailed {
            session_id: self.session_id.clone(),
            request_id: self.request_id.clone(),
            error: error.clone(),
        });
    }
}

impl ChatApp {
    /// Submit user input.
    ///
    /// Without an active session one is created first, named after the text.
    /// If that fails nothing is appended and no stream starts. Returns the
    /// request id of the started stream, or `None` for blank input.
    pub async fn submit(&mut self, text: &str) -> Result<Option<String>, ServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let session_id = match &self.active_session {
            SessionId::Resolved(id) => id.clone(),
            SessionId::Unresolved => self.create_and_activate(text, false).await?,
        };

        Ok(Some(self.start_stream(session_id, text)))
    }

    /// Append the live user message and placeholder, then spawn the stream.
    fn start_stream(&mut self, session_id: String, text: &str) -> String {
        let request_id = uuid::Uuid::new_v4().to_string();

        let user_seq = self.next_seq();
        self.messages
            .push(Message::live_user(user_message_id(&request_id), text, user_seq));
        let assistant_seq = self.next_seq();
        self.messages.push(Message::assistant_placeholder(
            assistant_message_id(&request_id),
            assistant_seq,
        ));

        self.in_flight
            .insert(request_id.clone(), session_id.clone());
        self.last_error = None;

        let request = StreamRequest::user_message(&self.identity.user_id, &session_id, text)
            .with_access_token(self.identity.access_token.clone())
            .with_request_type(self.backend.config().request_type.clone());
        let session = StreamSession::new(self.backend.clone(), request);
        let mut observer =
            ChannelObserver::new(self.message_tx.clone(), &session_id, &request_id);

        tracing::debug!(%session_id, %request_id, "Starting stream");
        tokio::spawn(async move {
            session.run(&mut observer).await;
        });

        request_id
    }
}
