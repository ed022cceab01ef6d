//! SSE (Server-Sent Events) stream decoding
//!
//! Decodes the streaming body of the chat backend's send endpoint. The wire
//! format is a minimal subset of SSE:
//! - frames are separated by an exact `\n\n`
//! - `event: <type>` sets the event type (default `message`)
//! - `data: <payload>` lines are concatenated into the payload
//! - comments, `id:` and `retry:` are ignored
//!
//! # Module structure
//! - `decoder` - Byte chunks to frames (FrameDecoder)
//! - `events` - Event type definitions (ProtocolEvent, EventKind, SseLine, SseParseError)
//! - `payloads` - Internal payload deserialization structs
//! - `parser` - Frame parsing (parse_frame, parse_sse_line, SseParser)

mod decoder;
mod events;
mod parser;
mod payloads;

// Re-export public types
pub use decoder::{EndOfInput, FrameDecoder, FRAME_DELIMITER};
pub use events::{
    EventKind, ProtocolEvent, SseLine, SseParseError, DEFAULT_EVENT_TYPE, DELTA_EVENT, DONE_EVENT,
};
pub use parser::{parse_delta_content, parse_frame, parse_sse_line, SseParser};
