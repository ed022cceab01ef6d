//! SSE payload deserialization structs
//!
//! Contains internal structs used to deserialize JSON data payloads
//! from the chat backend stream.

use serde::Deserialize;

/// Payload of a `delta` event: `{"content": "..."}`
///
/// `content` is optional here so that an absent or null field can be reported
/// as a missing field rather than a generic JSON error.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DeltaPayload {
    #[serde(default)]
    pub content: Option<String>,
}
