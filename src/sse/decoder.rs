//! Incremental frame decoder for the response body.
//!
//! The transport hands over the body in arbitrarily sized byte chunks. A chunk
//! may end in the middle of a frame or in the middle of a multi-byte UTF-8
//! character, so both the text decoding and the frame splitting keep state
//! between calls.

/// Exact delimiter separating two frames.
pub const FRAME_DELIMITER: &str = "\n\n";

/// Synthetic terminal signal produced by [`FrameDecoder::finish`].
///
/// Lets callers tell a closed connection apart from an explicit `done` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfInput {
    /// Bytes of an unterminated trailing fragment that were dropped
    pub discarded_bytes: usize,
}

/// Stateful byte-to-frame decoder.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Decoded text not yet terminated by a delimiter
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence
    pending: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of the body, returning every frame it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode_into_buffer(chunk);
        self.drain_frames()
    }

    /// Text buffered after the last complete frame.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Signal end of input.
    ///
    /// Any unterminated fragment is discarded rather than parsed as a final
    /// frame. The decoder is left empty and can be reused.
    pub fn finish(&mut self) -> EndOfInput {
        let discarded_bytes = self.buffer.len() + self.pending.len();
        if discarded_bytes > 0 {
            tracing::warn!(
                discarded_bytes,
                "Stream ended with an unterminated frame, discarding it"
            );
        }
        self.buffer.clear();
        self.pending.clear();
        EndOfInput { discarded_bytes }
    }

    fn decode_into_buffer(&mut self, chunk: &[u8]) {
        let joined;
        let mut rest: &[u8] = if self.pending.is_empty() {
            chunk
        } else {
            let mut bytes = std::mem::take(&mut self.pending);
            bytes.extend_from_slice(chunk);
            joined = bytes;
            &joined
        };

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    return;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    self.buffer
                        .push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match err.error_len() {
                        // Invalid sequence: replace it, as a lossy decoder would
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        // Incomplete sequence at the end: wait for the next chunk
                        None => {
                            self.pending = after.to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }

    fn drain_frames(&mut self) -> Vec<String> {
        let mut frames = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[start..].find(FRAME_DELIMITER) {
            let end = start + offset;
            frames.push(self.buffer[start..end].to_string());
            start = end + FRAME_DELIMITER.len();
        }
        if start > 0 {
            self.buffer.drain(..start);
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(chunks: &[&[u8]]) -> Vec<String> {
        let mut decoder = FrameDecoder::new();
        chunks.iter().flat_map(|c| decoder.feed(c)).collect()
    }

    #[test]
    fn test_single_complete_frame() {
        let frames = decode_all(&[b"event:delta\ndata:{\"content\":\"hi\"}\n\n"]);
        assert_eq!(frames, vec!["event:delta\ndata:{\"content\":\"hi\"}"]);
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(b"event:del").is_empty());
        assert_eq!(decoder.buffered(), "event:del");
        assert!(decoder.feed(b"ta\ndata:x\n").is_empty());
        let frames = decoder.feed(b"\nevent:done");
        assert_eq!(frames, vec!["event:delta\ndata:x"]);
        assert_eq!(decoder.buffered(), "event:done");
    }

    #[test]
    fn test_multiple_frames_in_one_chunk() {
        let frames = decode_all(&[b"data:a\n\ndata:b\n\ndata:c"]);
        assert_eq!(frames, vec!["data:a", "data:b"]);
    }

    #[test]
    fn test_delimiter_split_between_chunks() {
        let frames = decode_all(&[b"data:a\n", b"\n", b"data:b\n", b"\n"]);
        assert_eq!(frames, vec!["data:a", "data:b"]);
    }

    #[test]
    fn test_consecutive_delimiters_yield_empty_frames() {
        let frames = decode_all(&[b"data:a\n\n\n\ndata:b\n\n"]);
        assert_eq!(frames, vec!["data:a", "", "data:b"]);
    }

    #[test]
    fn test_crlf_is_not_a_delimiter() {
        let frames = decode_all(&[b"data:a\r\n\r\n"]);
        assert!(frames.is_empty());
    }

    #[test]
    fn test_multibyte_character_split_across_chunks() {
        let text = "data:{\"content\":\"héllo 世界 🎉\"}\n\n";
        let bytes = text.as_bytes();

        for split in 0..=bytes.len() {
            let (a, b) = bytes.split_at(split);
            let frames = decode_all(&[a, b]);
            assert_eq!(
                frames,
                vec!["data:{\"content\":\"héllo 世界 🎉\"}"],
                "split at {}",
                split
            );
        }
    }

    #[test]
    fn test_emoji_fed_one_byte_at_a_time() {
        let text = "data:🎉\n\n";
        let mut decoder = FrameDecoder::new();
        let mut frames = Vec::new();
        for byte in text.as_bytes() {
            frames.extend(decoder.feed(std::slice::from_ref(byte)));
        }
        assert_eq!(frames, vec!["data:🎉"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let frames = decode_all(&[b"data:a\xFFb\n\n"]);
        assert_eq!(frames, vec!["data:a\u{FFFD}b"]);
    }

    #[test]
    fn test_finish_discards_trailing_fragment() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed(b"data:a\n\ndata:partial");
        assert_eq!(frames, vec!["data:a"]);

        let end = decoder.finish();
        assert_eq!(end.discarded_bytes, "data:partial".len());
        assert_eq!(decoder.buffered(), "");
    }

    #[test]
    fn test_finish_counts_pending_bytes() {
        let mut decoder = FrameDecoder::new();
        // First two bytes of a three-byte character
        assert!(decoder.feed(&"世".as_bytes()[..2]).is_empty());
        assert_eq!(decoder.finish().discarded_bytes, 2);
    }

    #[test]
    fn test_finish_on_clean_boundary() {
        let mut decoder = FrameDecoder::new();
        decoder.feed(b"data:a\n\n");
        assert_eq!(decoder.finish(), EndOfInput { discarded_bytes: 0 });
    }
}
