//! Lazy decoding stream over a response body

use std::pin::Pin;
use std::task::{Context, Poll};

use flotilla_core::{Result, StreamEvent};
use futures::Stream;

use crate::http::ByteStream;
use crate::sse::{LineBuffer, SseDecoder};

/// Boxed stream of generation events, the unified output of every path
pub type GenerationStream = Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>>;

/// Decodes a streamed text response into events, one line at a time
///
/// The stream owns the response connection. Reaching the end sentinel
/// drops it eagerly, and dropping the stream mid-response releases it;
/// either way no socket outlives the stream.
pub struct SseStream {
    inner: Option<ByteStream>,
    lines: LineBuffer,
    decoder: SseDecoder,
}

impl SseStream {
    /// Wrap a raw response byte stream
    pub fn new(inner: ByteStream) -> Self {
        Self {
            inner: Some(inner),
            lines: LineBuffer::new(),
            decoder: SseDecoder::new(),
        }
    }

    fn next_buffered_event(&mut self) -> Option<StreamEvent> {
        while let Some(line) = self.lines.next_line() {
            if let Some(event) = self.decoder.decode_line(&line) {
                return Some(event);
            }
        }
        None
    }
}

impl Stream for SseStream {
    type Item = Result<StreamEvent>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            // Drain buffered complete lines before pulling more bytes
            if let Some(event) = self.next_buffered_event() {
                if event == StreamEvent::End {
                    // Sentinel reached: release the connection eagerly
                    self.inner = None;
                    return Poll::Ready(None);
                }
                return Poll::Ready(Some(Ok(event)));
            }

            let inner = match self.inner.as_mut() {
                Some(inner) => inner,
                None => return Poll::Ready(None),
            };

            match inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => self.lines.push(&chunk),
                Poll::Ready(Some(Err(error))) => return Poll::Ready(Some(Err(error))),
                Poll::Ready(None) => {
                    // Connection closed without the sentinel: decode a
                    // trailing unterminated line, then end without error
                    self.inner = None;
                    if let Some(line) = self.lines.flush() {
                        match self.decoder.decode_line(&line) {
                            Some(StreamEvent::End) | None => {}
                            Some(event) => return Poll::Ready(Some(Ok(event))),
                        }
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
