//! Message handling for the ChatApp.

use super::messages::assistant_message_id;
use super::{AppMessage, ChatApp};
use crate::models::{Message, Provenance};

impl ChatApp {
    /// Apply a message from a spawned task.
    ///
    /// Results tagged with a session other than the active one, or aimed at a
    /// message no longer in the list, are dropped.
    pub fn handle_message(&mut self, msg: AppMessage) {
        if let AppMessage::StreamFinished { request_id, .. } = &msg {
            self.in_flight.remove(request_id);
        }
        if let AppMessage::HistoryLoaded { session_id, .. }
        | AppMessage::HistoryFailed { session_id, .. } = &msg
        {
            if self.history_loading.as_deref() == Some(session_id.as_str()) {
                self.history_loading = None;
            }
        }

        if !self.is_active(msg.session_id()) {
            tracing::debug!(session_id = %msg.session_id(), active = %self.active_session, "Dropping message for inactive session");
            return;
        }

        match msg {
            AppMessage::StreamUpdate {
                request_id,
                content,
                ..
            } => {
                if let Some(message) = self.assistant_message_mut(&request_id) {
                    message.set_streamed_content(&content);
                }
            }
            AppMessage::StreamFailed {
                request_id, error, ..
            } => {
                self.last_error = Some(error.user_message());
                if let Some(message) = self.assistant_message_mut(&request_id) {
                    message.fail();
                }
            }
            AppMessage::StreamFinished {
                request_id,
                content,
                ..
            } => {
                if let Some(message) = self.assistant_message_mut(&request_id) {
                    if !message.finish(&content) {
                        message.set_failure_text(&content);
                    }
                }
            }
            AppMessage::HistoryLoaded {
                session_id,
                entries,
            } => {
                let historical: Vec<Message> =
                    entries.into_iter().filter_map(Message::from_history).collect();
                tracing::debug!(%session_id, count = historical.len(), "History loaded");

                // Earlier history for this session is replaced; live messages stay after it
                let live = std::mem::take(&mut self.messages)
                    .into_iter()
                    .filter(|m| m.provenance() == Provenance::Live);
                self.messages = historical;
                self.messages.extend(live);
            }
            AppMessage::HistoryFailed { session_id, error } => {
                tracing::warn!(%session_id, error = %error, "Failed to load history");
                self.last_error = Some(error.user_message());
            }
        }
    }

    fn is_active(&self, session_id: &str) -> bool {
        self.active_session.as_resolved() == Some(session_id)
    }

    fn assistant_message_mut(&mut self, request_id: &str) -> Option<&mut Message> {
        let id = assistant_message_id(request_id);
        let found = self.messages.iter_mut().find(|m| m.id == id);
        if found.is_none() {
            tracing::debug!(%request_id, "Dropping stream message for removed placeholder");
        }
        found
    }
}
