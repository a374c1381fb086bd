//! Line-oriented decoding of the service's SSE subset
//!
//! The service streams `data: `-prefixed lines whose payload is either
//! a JSON object or the `[DONE]` sentinel. Everything else on the wire
//! (keep-alives, blank lines, other fields) carries no information and
//! is passed over.

use flotilla_core::{StreamEvent, TextDelta};
use tracing::debug;

use crate::parser::StreamPayload;

/// Literal prefix of meaningful stream lines
const DATA_PREFIX: &str = "data: ";

/// Payload marking the end of the stream
const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Reading,
    Done,
}

/// Decodes stream lines one at a time
///
/// A small two-state machine: it reads lines until the end sentinel,
/// after which every further line is ignored.
#[derive(Debug)]
pub struct SseDecoder {
    state: State,
}

impl SseDecoder {
    /// Create a decoder in the reading state
    pub fn new() -> Self {
        Self {
            state: State::Reading,
        }
    }

    /// Whether the end sentinel has been seen
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Decode one line
    ///
    /// Returns a delta for payloads carrying generated text,
    /// [`StreamEvent::End`] for the `[DONE]` sentinel, and `None` for
    /// everything else. Payloads that fail to parse are skipped; the
    /// stream is never poisoned by a single bad line.
    pub fn decode_line(&mut self, line: &str) -> Option<StreamEvent> {
        if self.state == State::Done {
            return None;
        }

        let payload = line.strip_prefix(DATA_PREFIX)?;

        if payload == DONE_SENTINEL {
            self.state = State::Done;
            return Some(StreamEvent::End);
        }

        match serde_json::from_str::<StreamPayload>(payload) {
            Ok(parsed) => parsed
                .data
                .map(|text| StreamEvent::Delta(TextDelta::new(text))),
            Err(error) => {
                debug!(%error, "skipping undecodable stream line");
                None
            }
        }
    }
}

impl Default for SseDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-assembles byte chunks into complete lines
///
/// Chunk boundaries carry no meaning in the stream, so raw bytes are
/// buffered until a line terminator arrives. Splitting happens on the
/// byte level (`\n` never occurs inside a multi-byte UTF-8 sequence),
/// and each complete line is decoded on its own, so a character split
/// across chunks comes out intact. Line bytes that are not valid UTF-8
/// are replaced lossily; the decoder skips the resulting junk lines on
/// its own.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of bytes
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Take the next complete line, without its terminator
    ///
    /// Trailing whitespace (including `\r`) is stripped. Empty lines
    /// are consumed and skipped.
    pub fn next_line(&mut self) -> Option<String> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let taken: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&taken).trim_end().to_string();
            if !line.is_empty() {
                return Some(line);
            }
        }
        None
    }

    /// Take whatever trails the last terminator, if anything
    ///
    /// Called when the connection closes: a final unterminated line is
    /// still worth decoding.
    pub fn flush(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        let rest = String::from_utf8_lossy(&rest);
        let rest = rest.trim_end();
        if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        }
    }
}
