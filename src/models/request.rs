//! Request bodies and query strings for the chat endpoints.

use serde::Serialize;

use super::serialize_id;
use crate::models::{Message, MessageRole};

/// Body of `POST /api/v1/chat/create`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateSessionRequest {
    pub user_id: String,
    pub name: String,
    pub school_id: i64,
    pub chat_type: i64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl CreateSessionRequest {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            school_id: 1,
            chat_type: 0,
            request_type: None,
            app_id: None,
        }
    }
}

/// Query of `GET /api/v1/chat/list`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSessionsQuery {
    pub user_id: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub school_id: Option<i64>,
    pub chat_type: Option<i64>,
}

impl ListSessionsQuery {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Default::default()
        }
    }

    pub fn to_query_string(&self) -> String {
        let params = [
            ("user_id", self.user_id.clone()),
            ("offset", self.offset.map(|v| v.to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("school_id", self.school_id.map(|v| v.to_string())),
            ("chat_type", self.chat_type.map(|v| v.to_string())),
        ];
        encode_pairs(params.iter().filter_map(|(k, v)| v.as_deref().map(|v| (*k, v))))
    }
}

/// Query of `GET /api/v1/chat/history`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryQuery {
    pub user_id: String,
    pub session_id: String,
    pub offset: u32,
    pub limit: u32,
}

impl HistoryQuery {
    pub fn new(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
            offset: 1,
            limit: 100,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn to_query_string(&self) -> String {
        let offset = self.offset.to_string();
        let limit = self.limit.to_string();
        encode_pairs([
            ("user_id", self.user_id.as_str()),
            ("session_id", self.session_id.as_str()),
            ("offset", offset.as_str()),
            ("limit", limit.as_str()),
        ])
    }
}

/// One turn in the `messages` array of a send request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatMessagePayload {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessagePayload {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

impl From<&Message> for ChatMessagePayload {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Body of `POST /api/v1/chat/send`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SendRequest {
    pub user_id: String,
    #[serde(serialize_with = "serialize_id")]
    pub session_id: String,
    #[serde(rename = "type")]
    pub request_type: String,
    pub provider: String,
    pub school_id: i64,
    pub app_id: String,
    pub chat_type: i64,
    pub messages: Vec<ChatMessagePayload>,
    pub stream: bool,
}

fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
