use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::HistoryEntry;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    /// Parse a wire role name.
    pub fn from_wire(role: &str) -> Option<Self> {
        match role {
            "user" => Some(MessageRole::User),
            "assistant" => Some(MessageRole::Assistant),
            "system" => Some(MessageRole::System),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

/// Lifecycle of a message's content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    /// Content is still growing
    Streaming,
    Complete,
    /// The stream ended with an error; content holds the error text
    Failed,
}

/// Where a message came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Typed or streamed during this run
    Live,
    /// Replayed from the backend
    Historical,
}

/// Ordering key of a message within the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOrder {
    /// Insertion sequence of a live message
    Live { seq: u64 },
    /// Position as stored by the backend
    Historical {
        server_id: String,
        created_at: Option<DateTime<Utc>>,
    },
}

/// A message in the active conversation
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub status: MessageStatus,
    pub order: MessageOrder,
}

impl Message {
    /// A user message typed in this run. Complete on creation.
    pub fn live_user(id: impl Into<String>, content: impl Into<String>, seq: u64) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::User,
            content: content.into(),
            status: MessageStatus::Complete,
            order: MessageOrder::Live { seq },
        }
    }

    /// Empty assistant message that a stream will fill in.
    pub fn assistant_placeholder(id: impl Into<String>, seq: u64) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::Assistant,
            content: String::new(),
            status: MessageStatus::Streaming,
            order: MessageOrder::Live { seq },
        }
    }

    /// Convert a history entry, skipping roles this client does not know.
    pub fn from_history(entry: HistoryEntry) -> Option<Self> {
        let Some(role) = MessageRole::from_wire(&entry.role) else {
            tracing::debug!(role = %entry.role, id = %entry.id, "Skipping history entry with unknown role");
            return None;
        };
        let created_at = entry.create_time.as_deref().and_then(parse_timestamp);

        Some(Self {
            id: format!("history:{}", entry.id),
            role,
            content: entry.content,
            status: MessageStatus::Complete,
            order: MessageOrder::Historical {
                server_id: entry.id,
                created_at,
            },
        })
    }

    pub fn provenance(&self) -> Provenance {
        match self.order {
            MessageOrder::Live { .. } => Provenance::Live,
            MessageOrder::Historical { .. } => Provenance::Historical,
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.status == MessageStatus::Streaming
    }

    /// Replace the streamed content. Ignored once the message is terminal.
    pub fn set_streamed_content(&mut self, content: &str) -> bool {
        if !self.is_streaming() {
            return false;
        }
        self.content.clear();
        self.content.push_str(content);
        true
    }

    /// Finish the stream with its final content.
    pub fn finish(&mut self, content: &str) -> bool {
        if self.set_streamed_content(content) {
            self.status = MessageStatus::Complete;
            true
        } else {
            false
        }
    }

    /// Mark the stream as failed. The terminal text arrives separately
    /// through [`Message::set_failure_text`].
    pub fn fail(&mut self) -> bool {
        if !self.is_streaming() {
            return false;
        }
        self.status = MessageStatus::Failed;
        true
    }

    /// Set terminal text on a failed message.
    pub fn set_failure_text(&mut self, text: &str) -> bool {
        if self.status != MessageStatus::Failed {
            return false;
        }
        self.content = text.to_string();
        true
    }
}

/// Parse the backend's `create_time`, RFC 3339 or `YYYY-MM-DD HH:MM:SS` (UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, role: &str, content: &str, time: Option<&str>) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            role: role.to_string(),
            content: content.to_string(),
            create_time: time.map(str::to_string),
        }
    }

    #[test]
    fn test_live_user_is_complete() {
        let msg = Message::live_user("r1:user", "hi", 0);
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.status, MessageStatus::Complete);
        assert_eq!(msg.provenance(), Provenance::Live);
    }

    #[test]
    fn test_streamed_content_only_while_streaming() {
        let mut msg = Message::assistant_placeholder("r1:assistant", 1);
        assert!(msg.set_streamed_content("Hel"));
        assert!(msg.set_streamed_content("Hello"));
        assert_eq!(msg.content, "Hello");

        assert!(msg.finish("Hello!"));
        assert_eq!(msg.status, MessageStatus::Complete);
        assert!(!msg.set_streamed_content("late"));
        assert!(!msg.finish("late"));
        assert_eq!(msg.content, "Hello!");
    }

    #[test]
    fn test_failed_message_takes_failure_text_once_failed() {
        let mut msg = Message::assistant_placeholder("r1:assistant", 1);
        assert!(!msg.set_failure_text("boom"));
        assert!(msg.fail());
        assert!(msg.set_failure_text("boom"));
        assert_eq!(msg.content, "boom");
        assert!(!msg.set_streamed_content("late"));
    }

    #[test]
    fn test_from_history() {
        let msg = Message::from_history(entry("5", "assistant", "hi", Some("2024-05-01 10:00:00")))
            .unwrap();
        assert_eq!(msg.id, "history:5");
        assert_eq!(msg.provenance(), Provenance::Historical);
        assert_eq!(msg.status, MessageStatus::Complete);
        match msg.order {
            MessageOrder::Historical {
                server_id,
                created_at,
            } => {
                assert_eq!(server_id, "5");
                assert_eq!(created_at.unwrap().to_rfc3339(), "2024-05-01T10:00:00+00:00");
            }
            other => panic!("unexpected order {:?}", other),
        }
    }

    #[test]
    fn test_from_history_rfc3339_and_garbage_time() {
        let msg = Message::from_history(entry("1", "user", "", Some("2024-05-01T10:00:00Z"))).unwrap();
        assert!(matches!(
            msg.order,
            MessageOrder::Historical { created_at: Some(_), .. }
        ));

        let msg = Message::from_history(entry("2", "user", "", Some("yesterday"))).unwrap();
        assert!(matches!(
            msg.order,
            MessageOrder::Historical { created_at: None, .. }
        ));
    }

    #[test]
    fn test_from_history_unknown_role() {
        assert!(Message::from_history(entry("1", "tool", "x", None)).is_none());
    }
}
