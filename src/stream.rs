//! Stream session: one outbound chat request and its streamed answer.
//!
//! A [`StreamSession`] opens the send endpoint, feeds the body through the
//! SSE parser and accumulates `delta` fragments into the assistant's text.
//! Progress is reported through a [`StreamObserver`]; the terminal result is
//! the returned [`StreamOutcome`].

use futures_util::StreamExt;

use crate::backend::BackendClient;
use crate::error::StreamError;
use crate::models::{ChatMessagePayload, SendRequest};
use crate::sse::{parse_delta_content, EventKind, ProtocolEvent, SseParser};

/// Everything needed to send one message.
///
/// `session_id` is a backend id; an unresolved session cannot be expressed
/// here, so it must be created before a request is built.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamRequest {
    pub access_token: Option<String>,
    pub user_id: String,
    pub session_id: String,
    pub messages: Vec<ChatMessagePayload>,
    /// Subtype label sent as `type`
    pub request_type: String,
    pub stream: bool,
}

impl StreamRequest {
    /// Request carrying a single user message.
    pub fn user_message(
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            access_token: None,
            user_id: user_id.into(),
            session_id: session_id.into(),
            messages: vec![ChatMessagePayload::user(content)],
            request_type: crate::startup::config::DEFAULT_REQUEST_TYPE.to_string(),
            stream: true,
        }
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    pub fn with_request_type(mut self, request_type: impl Into<String>) -> Self {
        self.request_type = request_type.into();
        self
    }
}

/// Why a successful stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoneReason {
    /// The server sent a `done` event
    DoneEvent,
    /// The body ended without a `done` event
    ConnectionClosed,
}

/// Terminal result of a stream session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    Completed { content: String, reason: DoneReason },
    Failed(StreamError),
}

/// Receives progress of a stream session.
///
/// `on_success` is called exactly once per session. On failure `on_error`
/// comes first, then `on_success` with the error text.
pub trait StreamObserver: Send {
    /// Full accumulated text after each delta.
    fn on_update(&mut self, content: &str);

    /// Final text.
    fn on_success(&mut self, content: &str);

    fn on_error(&mut self, error: &StreamError);

    /// Events other than `delta` and `done`.
    fn on_event(&mut self, event: &ProtocolEvent) {
        tracing::debug!(event_type = %event.event_type, data_len = event.data.len(), "Ignoring stream event");
    }
}

/// Drives one send request to completion.
#[derive(Debug)]
pub struct StreamSession {
    backend: BackendClient,
    request: StreamRequest,
}

impl StreamSession {
    pub fn new(backend: BackendClient, request: StreamRequest) -> Self {
        Self { backend, request }
    }

    pub fn request(&self) -> &StreamRequest {
        &self.request
    }

    fn send_body(&self) -> SendRequest {
        let config = self.backend.config();
        SendRequest {
            user_id: self.request.user_id.clone(),
            session_id: self.request.session_id.clone(),
            request_type: self.request.request_type.clone(),
            provider: config.provider.clone(),
            school_id: config.school_id,
            app_id: config.app_id.clone(),
            chat_type: config.chat_type,
            messages: self.request.messages.clone(),
            stream: self.request.stream,
        }
    }

    /// Run the request, reporting to `observer`.
    pub async fn run<O>(self, observer: &mut O) -> StreamOutcome
    where
        O: StreamObserver + ?Sized,
    {
        let session_id = self.request.session_id.clone();
        let body = self.send_body();

        let mut stream = match self
            .backend
            .open_stream(self.request.access_token.as_deref(), &body)
            .await
        {
            Ok(stream) => stream,
            Err(err) => return fail(observer, &session_id, err.into()),
        };

        let mut parser = SseParser::new();
        let mut accumulator = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => return fail(observer, &session_id, StreamError::read(err)),
            };

            for event in parser.feed(&chunk) {
                match event.kind() {
                    EventKind::Delta => match parse_delta_content(&event.data) {
                        Ok(fragment) => {
                            accumulator.push_str(&fragment);
                            observer.on_update(&accumulator);
                        }
                        Err(err) => return fail(observer, &session_id, err.into()),
                    },
                    EventKind::Done => {
                        tracing::debug!(%session_id, len = accumulator.len(), "Stream done");
                        observer.on_success(&accumulator);
                        return StreamOutcome::Completed {
                            content: accumulator,
                            reason: DoneReason::DoneEvent,
                        };
                    }
                    EventKind::Other(_) => observer.on_event(&event),
                }
            }
        }

        let end = parser.finish();
        tracing::debug!(%session_id, discarded = end.discarded_bytes, "Stream closed without done event");
        observer.on_success(&accumulator);
        StreamOutcome::Completed {
            content: accumulator,
            reason: DoneReason::ConnectionClosed,
        }
    }
}

fn fail<O>(observer: &mut O, session_id: &str, error: StreamError) -> StreamOutcome
where
    O: StreamObserver + ?Sized,
{
    tracing::error!(%session_id, code = error.error_code(), "Stream failed: {}", error);
    observer.on_error(&error);
    observer.on_success(&error.to_string());
    StreamOutcome::Failed(error)
}
