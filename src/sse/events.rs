//! SSE event types and definitions
//!
//! Contains the raw [`ProtocolEvent`] produced by the frame parser, the
//! classification of its event type, and the line/parse error types.

use std::fmt;

/// Event type assumed when a frame carries no `event:` line.
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// Event type carrying an incremental content fragment.
pub const DELTA_EVENT: &str = "delta";

/// Event type signalling a normally closed stream.
pub const DONE_EVENT: &str = "done";

/// One parsed frame from the chat backend stream.
///
/// `data` is always the raw concatenated payload text. Decoding the JSON of a
/// `delta` payload is left to the consumer of the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolEvent {
    /// Value of the `event:` line, or [`DEFAULT_EVENT_TYPE`]
    pub event_type: String,
    /// Concatenated `data:` payload
    pub data: String,
}

impl ProtocolEvent {
    pub fn new(event_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            data: data.into(),
        }
    }

    /// Classify this event by its type name.
    pub fn kind(&self) -> EventKind<'_> {
        match self.event_type.as_str() {
            DELTA_EVENT => EventKind::Delta,
            DONE_EVENT => EventKind::Done,
            other => EventKind::Other(other),
        }
    }
}

/// The event types the stream session acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind<'a> {
    /// Incremental content fragment
    Delta,
    /// Stream closed normally
    Done,
    /// Anything else, forwarded unmodified
    Other(&'a str),
}

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: delta")
    Event(String),
    /// Data payload (e.g., "data: {\"content\": \"hello\"}")
    Data(String),
    /// Empty line
    Empty,
    /// Comment line, or a field this client does not use (`id:`, `retry:`)
    Comment(String),
}

/// Errors that can occur while interpreting an event payload
#[derive(Debug, Clone, PartialEq)]
pub enum SseParseError {
    /// Invalid JSON in data payload
    InvalidJson {
        event_type: String,
        source: String,
    },
    /// Payload decoded but a required field was absent or null
    MissingField {
        event_type: String,
        field: &'static str,
    },
}

impl fmt::Display for SseParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SseParseError::InvalidJson { event_type, source } => {
                write!(f, "Invalid JSON for event '{}': {}", event_type, source)
            }
            SseParseError::MissingField { event_type, field } => {
                write!(f, "Missing field '{}' in {} event", field, event_type)
            }
        }
    }
}

impl std::error::Error for SseParseError {}

impl SseParseError {
    /// Type of the event whose payload failed
    pub fn event_type(&self) -> &str {
        match self {
            SseParseError::InvalidJson { event_type, .. }
            | SseParseError::MissingField { event_type, .. } => event_type,
        }
    }
}
