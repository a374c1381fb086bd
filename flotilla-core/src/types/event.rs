//! Streaming event types for generation output

/// A chunk of generated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDelta {
    /// The text fragment
    pub text: String,
}

impl TextDelta {
    /// Create a new text delta
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The result of an image generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResult {
    /// URL(s) of the generated image(s)
    pub urls: Vec<String>,
    /// Alt text, equal to the prompt that produced the image(s)
    pub alt: String,
}

impl ImageResult {
    /// The first image URL, if any
    pub fn url(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }
}

/// Events produced while decoding a generation response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A fragment of generated text
    Delta(TextDelta),
    /// A completed image generation
    Image(ImageResult),
    /// The service signalled the end of the stream
    ///
    /// Callers never observe this event: the public stream simply
    /// terminates when it is reached.
    End,
}

/// Accumulates stream events into a complete result
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    text: String,
    images: Vec<ImageResult>,
}

impl StreamAccumulator {
    /// Create a new accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a stream event
    pub fn process_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Delta(delta) => self.text.push_str(&delta.text),
            StreamEvent::Image(image) => self.images.push(image),
            StreamEvent::End => {}
        }
    }

    /// The accumulated text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The accumulated image results
    pub fn images(&self) -> &[ImageResult] {
        &self.images
    }
}
