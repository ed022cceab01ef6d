use serde::Deserialize;
use std::fmt;

use super::deserialize_id;

/// Which session the controller is pointed at.
///
/// A conversation starts `Unresolved`; the first submit creates a session on
/// the backend and resolves it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SessionId {
    #[default]
    Unresolved,
    Resolved(String),
}

impl SessionId {
    pub fn resolved(id: impl Into<String>) -> Self {
        SessionId::Resolved(id.into())
    }

    /// The backend id, if resolved.
    pub fn as_resolved(&self) -> Option<&str> {
        match self {
            SessionId::Resolved(id) => Some(id),
            SessionId::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, SessionId::Resolved(_))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionId::Unresolved => write!(f, "<unresolved>"),
            SessionId::Resolved(id) => write!(f, "{}", id),
        }
    }
}

/// A conversation known to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    /// Display name, the only field that changes after creation
    pub name: String,
}

impl Session {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Session as returned by the create and list endpoints.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SessionRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        Session::new(record.id, record.name)
    }
}

/// One stored message as returned by the history endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub create_time: Option<String>,
}

/// Response wrapper used by every non-streaming endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    pub ok: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Server-provided failure text, from either `message` or `msg`.
    pub fn error_message(&self) -> Option<&str> {
        [&self.message, &self.msg]
            .into_iter()
            .filter_map(|m| m.as_deref())
            .find(|m| !m.is_empty())
    }
}
