//! SSE frame parsing logic
//!
//! Turns one decoded frame into a [`ProtocolEvent`], and provides the stateful
//! [`SseParser`] that chains the [`FrameDecoder`] with frame parsing.

mod delta;

use crate::sse::decoder::{EndOfInput, FrameDecoder};
use crate::sse::events::{ProtocolEvent, SseLine, DEFAULT_EVENT_TYPE};

pub use delta::parse_delta_content;

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    // id:, retry: and anything unknown are not used by this client
    SseLine::Comment(line.to_string())
}

/// Parse one frame into an event.
///
/// Lines are trimmed and empty ones dropped. The last `event:` line wins and
/// `data:` lines are concatenated in order without a separator. A frame whose
/// payload ends up empty yields `None`.
pub fn parse_frame(frame: &str) -> Option<ProtocolEvent> {
    let mut event_type: Option<String> = None;
    let mut data = String::new();

    for line in frame.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        match parse_sse_line(line) {
            SseLine::Event(value) => event_type = Some(value),
            SseLine::Data(value) => data.push_str(&value),
            SseLine::Empty | SseLine::Comment(_) => {}
        }
    }

    if data.is_empty() {
        return None;
    }

    Some(ProtocolEvent {
        event_type: event_type.unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string()),
        data,
    })
}

/// Stateful SSE parser that turns body chunks into events
#[derive(Debug, Default)]
pub struct SseParser {
    decoder: FrameDecoder,
}

impl SseParser {
    /// Create a new SSE parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a body chunk, returning the events of every frame it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ProtocolEvent> {
        self.decoder
            .feed(chunk)
            .iter()
            .filter_map(|frame| {
                let event = parse_frame(frame);
                if event.is_none() {
                    tracing::trace!(frame_len = frame.len(), "Frame without payload ignored");
                }
                event
            })
            .collect()
    }

    /// Signal end of input, discarding any unterminated frame.
    pub fn finish(&mut self) -> EndOfInput {
        self.decoder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests for parse_sse_line

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_sse_line(""), SseLine::Empty);
    }

    #[test]
    fn test_parse_comment_line() {
        assert_eq!(
            parse_sse_line(": keep-alive"),
            SseLine::Comment("keep-alive".to_string())
        );
    }

    #[test]
    fn test_parse_event_line() {
        assert_eq!(
            parse_sse_line("event: delta"),
            SseLine::Event("delta".to_string())
        );
        assert_eq!(
            parse_sse_line("event:delta"),
            SseLine::Event("delta".to_string())
        );
    }

    #[test]
    fn test_parse_data_line() {
        assert_eq!(
            parse_sse_line("data: {\"content\": \"hello\"}"),
            SseLine::Data("{\"content\": \"hello\"}".to_string())
        );
    }

    #[test]
    fn test_prefixes_are_case_sensitive() {
        assert_eq!(
            parse_sse_line("EVENT: delta"),
            SseLine::Comment("EVENT: delta".to_string())
        );
        assert_eq!(
            parse_sse_line("Data: x"),
            SseLine::Comment("Data: x".to_string())
        );
    }

    #[test]
    fn test_id_and_retry_are_ignored() {
        assert!(matches!(parse_sse_line("id: 42"), SseLine::Comment(_)));
        assert!(matches!(parse_sse_line("retry: 1000"), SseLine::Comment(_)));
    }

    // Tests for parse_frame

    #[test]
    fn test_parse_delta_frame() {
        let event = parse_frame("event:delta\ndata:{\"content\":\"hi\"}").unwrap();
        assert_eq!(event, ProtocolEvent::new("delta", "{\"content\":\"hi\"}"));
    }

    #[test]
    fn test_default_event_type_is_message() {
        let event = parse_frame("data: hello").unwrap();
        assert_eq!(event.event_type, "message");
        assert_eq!(event.data, "hello");
    }

    #[test]
    fn test_data_lines_concatenated_without_separator() {
        let event = parse_frame("event: delta\ndata: {\"content\":\ndata: \"ab\"}").unwrap();
        assert_eq!(event.data, "{\"content\":\"ab\"}");
    }

    #[test]
    fn test_event_without_data_yields_nothing() {
        assert_eq!(parse_frame("event:done"), None);
        assert_eq!(parse_frame("event: delta\ndata:"), None);
    }

    #[test]
    fn test_comment_only_frame_yields_nothing() {
        assert_eq!(parse_frame(": ping"), None);
        assert_eq!(parse_frame(""), None);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let event = parse_frame("  event: delta  \r\n  data: x  \r").unwrap();
        assert_eq!(event, ProtocolEvent::new("delta", "x"));
    }

    #[test]
    fn test_id_and_retry_fields_do_not_affect_event() {
        let event = parse_frame("id: 7\nretry: 3000\nevent: delta\ndata: y").unwrap();
        assert_eq!(event, ProtocolEvent::new("delta", "y"));
    }

    #[test]
    fn test_data_is_kept_raw() {
        let event = parse_frame("event: delta\ndata: not json").unwrap();
        assert_eq!(event.data, "not json");
    }

    // Tests for SseParser

    #[test]
    fn test_parser_realistic_stream() {
        let mut parser = SseParser::new();
        let body = concat!(
            ": connected\n\n",
            "event: delta\ndata: {\"content\":\"Hello, \"}\n\n",
            "event: usage\ndata: {\"tokens\": 3}\n\n",
            "event: delta\ndata: {\"content\":\"world!\"}\n\n",
            "event: done\ndata: [DONE]\n\n",
        );

        let events = parser.feed(body.as_bytes());
        let types: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(types, vec!["delta", "usage", "delta", "done"]);
    }

    #[test]
    fn test_parser_chunking_invariance() {
        let body = concat!(
            "event:delta\ndata:{\"content\":\"hi\"}\n\n",
            "event:delta\ndata:{\"content\":\" thére\"}\n\n",
            "event:status\ndata:thinking\n\n",
            "event:done\n\n",
            "event:done\ndata:{}\n\n",
        )
        .as_bytes();

        let mut whole = SseParser::new();
        let expected = whole.feed(body);
        assert_eq!(expected.len(), 4);

        // Every two-way split
        for split in 0..=body.len() {
            let mut parser = SseParser::new();
            let (a, b) = body.split_at(split);
            let mut events = parser.feed(a);
            events.extend(parser.feed(b));
            assert_eq!(events, expected, "split at {}", split);
        }

        // Fixed chunk sizes
        for size in 1..=7 {
            let mut parser = SseParser::new();
            let events: Vec<ProtocolEvent> =
                body.chunks(size).flat_map(|c| parser.feed(c)).collect();
            assert_eq!(events, expected, "chunk size {}", size);
        }
    }

    #[test]
    fn test_round_trip_frame_embedded_in_noise() {
        let body = concat!(
            ": hello\n\n",
            "event:status\ndata:one\n\n",
            "event:delta\ndata:{\"content\":\"hi\"}\n\n",
            "event:status\ndata:two\n\n",
        )
        .as_bytes();

        for size in [1, 2, 3, 5, 11, 64] {
            let mut parser = SseParser::new();
            let events: Vec<ProtocolEvent> =
                body.chunks(size).flat_map(|c| parser.feed(c)).collect();
            assert!(events.contains(&ProtocolEvent::new("delta", "{\"content\":\"hi\"}")));
        }
    }

    #[test]
    fn test_parser_finish_discards_partial_frame() {
        let mut parser = SseParser::new();
        let events = parser.feed(b"event:delta\ndata:{\"content\":\"a\"}\n\nevent:delta\ndata:{\"con");
        assert_eq!(events.len(), 1);
        assert!(parser.finish().discarded_bytes > 0);
    }
}
