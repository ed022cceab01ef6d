//! Delta payload decoding

use crate::sse::events::{SseParseError, DELTA_EVENT};
use crate::sse::payloads::DeltaPayload;

/// Decode the `content` fragment of a `delta` event payload.
///
/// Fails on malformed JSON, and on a payload that lacks a string `content`
/// field instead of coercing it to an empty fragment.
pub fn parse_delta_content(data: &str) -> Result<String, SseParseError> {
    let payload: DeltaPayload =
        serde_json::from_str(data).map_err(|e| SseParseError::InvalidJson {
            event_type: DELTA_EVENT.to_string(),
            source: e.to_string(),
        })?;

    payload.content.ok_or(SseParseError::MissingField {
        event_type: DELTA_EVENT.to_string(),
        field: "content",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delta_content() {
        assert_eq!(parse_delta_content(r#"{"content": "Hello"}"#).unwrap(), "Hello");
    }

    #[test]
    fn test_parse_delta_keeps_whitespace_and_unicode() {
        assert_eq!(
            parse_delta_content(r#"{"content": " 世界\n"}"#).unwrap(),
            " 世界\n"
        );
    }

    #[test]
    fn test_parse_delta_ignores_extra_fields() {
        assert_eq!(
            parse_delta_content(r#"{"content": "x", "id": 3, "model": "gpt"}"#).unwrap(),
            "x"
        );
    }

    #[test]
    fn test_parse_delta_empty_content_is_valid() {
        assert_eq!(parse_delta_content(r#"{"content": ""}"#).unwrap(), "");
    }

    #[test]
    fn test_parse_delta_invalid_json() {
        let result = parse_delta_content("not json");
        assert!(matches!(result, Err(SseParseError::InvalidJson { .. })));
    }

    #[test]
    fn test_parse_delta_missing_content() {
        let result = parse_delta_content(r#"{"text": "wrong field"}"#);
        assert_eq!(
            result,
            Err(SseParseError::MissingField {
                event_type: "delta".to_string(),
                field: "content",
            })
        );
    }

    #[test]
    fn test_parse_delta_null_content() {
        let result = parse_delta_content(r#"{"content": null}"#);
        assert!(matches!(result, Err(SseParseError::MissingField { .. })));
    }

    #[test]
    fn test_parse_delta_non_string_content() {
        let result = parse_delta_content(r#"{"content": 42}"#);
        assert!(matches!(result, Err(SseParseError::InvalidJson { .. })));
    }
}
