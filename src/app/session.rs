//! Session lifecycle: create, switch, list and reset.

use super::{AppMessage, ChatApp};
use crate::auth;
use crate::error::{IdentityError, ServiceError};
use crate::models::{find_prompt, ListSessionsQuery, Session, SessionId};

/// Name given to sessions created without any text.
pub const NEW_CHAT_NAME: &str = "New Chat";

impl ChatApp {
    /// Create a session, prepend it and make it active.
    pub(super) async fn create_and_activate(
        &mut self,
        name: &str,
        clear_messages: bool,
    ) -> Result<String, ServiceError> {
        let session = match self
            .backend
            .create_session(&self.identity.user_id, name)
            .await
        {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to create session");
                self.last_error = Some(err.user_message());
                return Err(err);
            }
        };

        let id = session.id.clone();
        tracing::info!(session_id = %id, "Session active");
        self.sessions.insert(0, session);
        self.active_session = SessionId::Resolved(id.clone());
        self.history_loading = None;
        if clear_messages {
            self.messages.clear();
        }
        Ok(id)
    }

    /// Start a new conversation named "New Chat".
    ///
    /// On failure the session list, active session and messages are untouched.
    pub async fn new_conversation(&mut self) -> Result<Session, ServiceError> {
        let id = self.create_and_activate(NEW_CHAT_NAME, true).await?;
        Ok(Session::new(id, NEW_CHAT_NAME))
    }

    /// Go back to an unresolved session; the next submit creates one.
    pub fn start_draft(&mut self) {
        self.active_session = SessionId::Unresolved;
        self.history_loading = None;
        self.messages.clear();
    }

    /// Make `session_id` active and fetch its history.
    ///
    /// Returns `false` if it already was the active session.
    pub fn switch_session(&mut self, session_id: &str) -> bool {
        if self.active_session.as_resolved() == Some(session_id) {
            return false;
        }

        tracing::info!(%session_id, "Switching session");
        self.active_session = SessionId::resolved(session_id);
        self.messages.clear();
        self.history_loading = Some(session_id.to_string());

        let backend = self.backend.clone();
        let tx = self.message_tx.clone();
        let user_id = self.identity.user_id.clone();
        let session_id = session_id.to_string();

        tokio::spawn(async move {
            let message = match backend.get_history(&user_id, &session_id).await {
                Ok(entries) => AppMessage::HistoryLoaded {
                    session_id,
                    entries,
                },
                Err(error) => AppMessage::HistoryFailed { session_id, error },
            };
            let _ = tx.send(message);
        });

        true
    }

    /// Replace the session list with the backend's.
    ///
    /// On failure the current list is kept.
    pub async fn load_sessions(&mut self) -> Result<usize, ServiceError> {
        let query = ListSessionsQuery::for_user(&self.identity.user_id);

        match self.backend.list_sessions(&query).await {
            Ok(sessions) => {
                tracing::debug!(count = sessions.len(), "Loaded sessions");
                self.sessions = sessions;
                Ok(self.sessions.len())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to list sessions");
                self.last_error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Submit a predefined prompt. Returns `Ok(None)` for an unknown key.
    pub async fn select_prompt(&mut self, key: &str) -> Result<Option<String>, ServiceError> {
        let Some(text) = find_prompt(&self.prompt_groups, key).map(|p| p.text) else {
            tracing::debug!(key, "Unknown prompt key");
            return Ok(None);
        };
        self.submit(text).await
    }

    /// Set or clear the access token and persist it.
    pub async fn set_access_token(&mut self, token: Option<String>) -> Result<(), IdentityError> {
        let token = token.filter(|t| !t.is_empty());
        auth::set_token(self.identity_store.as_ref(), &mut self.identity, token).await
    }
}
