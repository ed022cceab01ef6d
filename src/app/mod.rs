//! Conversation controller.
//!
//! [`ChatApp`] owns the session list, the active session and the message
//! list of that session. Streams and history fetches run in spawned tasks
//! and report back through [`AppMessage`]s, which the owner of the app feeds
//! to [`ChatApp::handle_message`].

mod handlers;
mod messages;
mod session;
mod stream;

pub use messages::{assistant_message_id, user_message_id, AppMessage};
pub use session::NEW_CHAT_NAME;
pub use stream::ChannelObserver;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::auth::Identity;
use crate::backend::BackendClient;
use crate::models::{default_prompt_groups, Message, PromptGroup, Session, SessionId};
use crate::traits::IdentityStore;

/// Coarse state of the controller, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    /// No session yet; the next submit creates one
    NoActiveSession,
    /// A session is active and idle
    SessionSelected,
    /// A stream for the active session is running
    RequestInFlight,
    /// The active session's history is being fetched
    HistoryLoading,
}

/// Chat controller state
pub struct ChatApp {
    /// Known sessions, most recently created first
    pub sessions: Vec<Session>,
    pub active_session: SessionId,
    /// Messages of the active session: historical first, then live
    pub messages: Vec<Message>,
    /// Last error to show the user
    pub last_error: Option<String>,
    pub identity: Identity,
    pub prompt_groups: Vec<PromptGroup>,
    /// Receiver for async task messages; taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender handed to spawned tasks
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    backend: BackendClient,
    identity_store: Arc<dyn IdentityStore>,
    /// Running streams: request id -> session id
    in_flight: HashMap<String, String>,
    /// Session whose history fetch is outstanding
    history_loading: Option<String>,
    next_seq: u64,
}

impl std::fmt::Debug for ChatApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatApp")
            .field("active_session", &self.active_session)
            .field("sessions", &self.sessions.len())
            .field("messages", &self.messages.len())
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl ChatApp {
    pub fn new(
        backend: BackendClient,
        identity: Identity,
        identity_store: Arc<dyn IdentityStore>,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            sessions: Vec::new(),
            active_session: SessionId::Unresolved,
            messages: Vec::new(),
            last_error: None,
            identity,
            prompt_groups: default_prompt_groups(),
            message_rx: Some(message_rx),
            message_tx,
            backend,
            identity_store,
            in_flight: HashMap::new(),
            history_loading: None,
            next_seq: 0,
        }
    }

    pub fn state(&self) -> ConversationState {
        let Some(active) = self.active_session.as_resolved() else {
            return ConversationState::NoActiveSession;
        };
        if self.history_loading.as_deref() == Some(active) {
            ConversationState::HistoryLoading
        } else if self.in_flight.values().any(|s| s == active) {
            ConversationState::RequestInFlight
        } else {
            ConversationState::SessionSelected
        }
    }

    /// Number of streams still running, in any session.
    pub fn streams_in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn active_session_name(&self) -> Option<&str> {
        let active = self.active_session.as_resolved()?;
        self.sessions
            .iter()
            .find(|s| s.id == active)
            .map(|s| s.name.as_str())
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
