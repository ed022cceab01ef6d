//! Data types shared by the backend client, stream sessions and controller.

mod message;
mod prompt;
mod request;
mod session;

pub use message::*;
pub use prompt::{default_prompt_groups, find_prompt, PromptGroup, PromptShortcut};
pub use request::{
    ChatMessagePayload, CreateSessionRequest, HistoryQuery, ListSessionsQuery, SendRequest,
};
pub use session::{ApiEnvelope, HistoryEntry, Session, SessionId, SessionRecord};

use serde::{Deserializer, Serializer};

/// Helper to deserialize id as either string or integer
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Helper to serialize an id back as an integer when it is numeric
pub(crate) fn serialize_id<S>(id: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id.parse::<i64>() {
        Ok(number) => serializer.serialize_i64(number),
        Err(_) => serializer.serialize_str(id),
    }
}
