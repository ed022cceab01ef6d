//! Chat backend API client.
//!
//! Typed wrappers for the create, list, history and send endpoints. All
//! traffic goes through an injected [`HttpClient`].

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::ServiceError;
use crate::models::{
    ApiEnvelope, CreateSessionRequest, HistoryEntry, HistoryQuery, ListSessionsQuery, SendRequest,
    Session, SessionRecord,
};
use crate::startup::ClientConfig;
use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

pub const CREATE_PATH: &str = "/api/v1/chat/create";
pub const LIST_PATH: &str = "/api/v1/chat/list";
pub const HISTORY_PATH: &str = "/api/v1/chat/history";
pub const SEND_PATH: &str = "/api/v1/chat/send";

/// Client for the chat backend.
#[derive(Clone)]
pub struct BackendClient {
    config: Arc<ClientConfig>,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("backend_url", &self.config.backend_url)
            .finish_non_exhaustive()
    }
}

impl BackendClient {
    pub fn new(config: ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a session named `name` for the user.
    pub async fn create_session(&self, user_id: &str, name: &str) -> Result<Session, ServiceError> {
        const OPERATION: &str = "create session";

        let mut request = CreateSessionRequest::new(user_id, name);
        request.school_id = self.config.school_id;
        request.chat_type = self.config.chat_type;
        if !self.config.app_id.is_empty() {
            request.app_id = Some(self.config.app_id.clone());
        }

        let body = to_json(OPERATION, &request)?;
        let response = self
            .http
            .post(&self.config.endpoint(CREATE_PATH), &body, &json_headers())
            .await?;

        let record: SessionRecord = decode_envelope(OPERATION, &response)?.ok_or_else(|| {
            ServiceError::Decode {
                operation: OPERATION.to_string(),
                message: "response has no session".to_string(),
            }
        })?;

        tracing::info!(session_id = %record.id, name = %record.name, "Created session");
        Ok(record.into())
    }

    /// List sessions. Only the query fields that are set are sent.
    pub async fn list_sessions(&self, query: &ListSessionsQuery) -> Result<Vec<Session>, ServiceError> {
        let url = with_query(self.config.endpoint(LIST_PATH), &query.to_query_string());
        let response = self.http.get(&url, &Headers::new()).await?;

        let records: Vec<SessionRecord> =
            decode_envelope("list sessions", &response)?.unwrap_or_default();
        Ok(records.into_iter().map(Session::from).collect())
    }

    /// Fetch the stored messages of a session in server order.
    pub async fn get_history(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Vec<HistoryEntry>, ServiceError> {
        let query = HistoryQuery::new(user_id, session_id).with_limit(self.config.history_limit);
        let url = with_query(self.config.endpoint(HISTORY_PATH), &query.to_query_string());
        let response = self.http.get(&url, &Headers::new()).await?;

        Ok(decode_envelope("fetch history", &response)?.unwrap_or_default())
    }

    /// Open the streaming send request and hand back the raw body.
    pub async fn open_stream(
        &self,
        access_token: Option<&str>,
        request: &SendRequest,
    ) -> Result<ByteStream, HttpError> {
        let body = serde_json::to_string(request).map_err(|e| HttpError::Other(e.to_string()))?;

        let mut headers = json_headers();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        if let Some(token) = access_token.filter(|t| !t.is_empty()) {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }

        self.http
            .post_stream(&self.config.endpoint(SEND_PATH), &body, &headers)
            .await
    }
}

fn json_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

fn with_query(url: String, query: &str) -> String {
    if query.is_empty() {
        url
    } else {
        format!("{}?{}", url, query)
    }
}

fn to_json<T: serde::Serialize>(operation: &str, value: &T) -> Result<String, ServiceError> {
    serde_json::to_string(value).map_err(|e| ServiceError::Decode {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}

/// Check status and envelope, returning the `data` payload if present.
fn decode_envelope<T: DeserializeOwned>(
    operation: &str,
    response: &Response,
) -> Result<Option<T>, ServiceError> {
    if !response.is_success() {
        return Err(HttpError::ServerError {
            status: response.status,
            message: response.text(),
        }
        .into());
    }

    let envelope: ApiEnvelope<T> = response.json().map_err(|e| ServiceError::Decode {
        operation: operation.to_string(),
        message: e.to_string(),
    })?;

    if !envelope.ok {
        let message = envelope
            .error_message()
            .unwrap_or("request was not accepted")
            .to_string();
        tracing::warn!(operation, %message, "Backend rejected request");
        return Err(ServiceError::Rejected {
            operation: operation.to_string(),
            message,
        });
    }

    Ok(envelope.data)
}
