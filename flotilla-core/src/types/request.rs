//! Request types for generation calls

use crate::types::message::Message;
use thiserror::Error;

/// A model identifier, as requested by the caller
///
/// This is the raw name before any alias resolution. Resolution against
/// the service catalog happens at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model(pub String);

impl Model {
    /// Create a new model identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of output a model produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Incremental text deltas over a streamed response
    Text,
    /// A single response carrying generated image URL(s)
    Image,
}

/// A generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The conversation messages
    pub messages: Vec<Message>,
    /// The requested model, if any; `None` uses the service default
    pub model: Option<Model>,
    /// Per-call proxy URL, overriding any client-level proxy
    pub proxy: Option<String>,
}

impl GenerationRequest {
    /// Create a new request builder
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Create a simple request with just messages
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            model: None,
            proxy: None,
        }
    }

    /// The prompt text: the content of the last message
    ///
    /// Used as the image-generation prompt and as the alt text of
    /// generated images.
    pub fn prompt(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}

/// Builder for [`GenerationRequest`]
#[derive(Debug, Default)]
pub struct GenerationRequestBuilder {
    messages: Vec<Message>,
    model: Option<Model>,
    proxy: Option<String>,
}

impl GenerationRequestBuilder {
    /// Add a message
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add multiple messages
    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<Model>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set a per-call proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the request without validation
    pub fn build(self) -> GenerationRequest {
        GenerationRequest {
            messages: self.messages,
            model: self.model,
            proxy: self.proxy,
        }
    }

    /// Try to build the request, returning an error if validation fails
    pub fn try_build(self) -> Result<GenerationRequest, BuildError> {
        if self.messages.is_empty() {
            return Err(BuildError::NoMessages);
        }

        Ok(GenerationRequest {
            messages: self.messages,
            model: self.model,
            proxy: self.proxy,
        })
    }
}

/// Errors that can occur when building a request
#[derive(Debug, Error)]
pub enum BuildError {
    /// Request must contain at least one message
    #[error("Request must contain at least one message")]
    NoMessages,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::message::Message;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_model_creation() {
        let model = Model::new("hermes3-70b");
        assert_eq!(model.0, "hermes3-70b");

        let model = Model::from("flux");
        assert_eq!(model.0, "flux");

        let model = Model::from("custom".to_string());
        assert_eq!(model.0, "custom");

        let model: Model = "other".into();
        assert_eq!(model.0, "other");
    }

    #[test]
    fn test_model_display() {
        let model = Model("hermes3-405b".to_string());
        assert_eq!(model.to_string(), "hermes3-405b");
    }

    #[test]
    fn test_request_new() {
        let messages = vec![Message::system("Be brief"), Message::user("Hello")];
        let request = GenerationRequest::new(messages);

        assert_eq!(request.messages.len(), 2);
        assert!(request.model.is_none());
        assert!(request.proxy.is_none());
    }

    #[test]
    fn test_request_prompt_is_last_message() {
        let request = GenerationRequest::builder()
            .message(Message::system("Be brief"))
            .message(Message::user("a sunset over water"))
            .build();
        assert_eq!(request.prompt(), Some("a sunset over water"));

        let empty = GenerationRequest::new(vec![]);
        assert_eq!(empty.prompt(), None);
    }

    #[test]
    fn test_request_builder_basic() {
        let request = GenerationRequest::builder()
            .message(Message::user("Hello"))
            .model("hermes3-70b")
            .proxy("http://proxy.example:8080")
            .build();

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.model, Some(Model::new("hermes3-70b")));
        assert_eq!(request.proxy.as_deref(), Some("http://proxy.example:8080"));
    }

    #[test]
    fn test_request_builder_with_messages() {
        let messages = vec![
            Message::user("First"),
            Message::assistant("Response"),
            Message::user("Second"),
        ];
        let request = GenerationRequest::builder().messages(messages).build();

        assert_eq!(request.messages.len(), 3);
    }

    #[test]
    fn test_request_builder_try_build_success() {
        let result = GenerationRequest::builder()
            .message(Message::user("test"))
            .try_build();

        assert!(result.is_ok());
        assert_eq!(result.unwrap().messages.len(), 1);
    }

    #[test]
    fn test_request_builder_try_build_no_messages() {
        let result = GenerationRequest::builder().try_build();

        match result {
            Err(BuildError::NoMessages) => {}
            _ => panic!("Expected NoMessages error"),
        }
    }

    #[test]
    fn test_build_error_display() {
        let error = BuildError::NoMessages;
        assert_eq!(
            error.to_string(),
            "Request must contain at least one message"
        );
    }

    #[test]
    fn test_request_clone_equality() {
        let request = GenerationRequest::builder()
            .message(Message::user("test"))
            .model("flux")
            .build();

        let cloned = request.clone();
        assert_eq!(request, cloned);
    }
}
