//! High-level generation client

use std::sync::Arc;

use futures::StreamExt;
use reqwest::header::HeaderMap;
use serde_json::Value;

use flotilla_core::{
    Capability, Error, GenerationRequest, ImageResult, Result, StreamAccumulator, StreamEvent,
};

use crate::config::ClientConfig;
use crate::convert;
use crate::dispatch::try_candidates;
use crate::endpoints::EndpointSet;
use crate::http::{request_headers, HttpClient, ReqwestClient};
use crate::models::ModelCatalog;
use crate::parser;
use crate::stream::{GenerationStream, SseStream};

/// High-level client for the replicated generation service
///
/// Each call resolves the requested model against the catalog, builds
/// the wire payload, and dispatches it across the matching replica set
/// in randomized order.
///
/// # Examples
///
/// ```no_run
/// use flotilla_client::Client;
/// use flotilla_core::{GenerationRequest, Message};
/// use futures::StreamExt;
///
/// # async fn example() -> Result<(), flotilla_core::Error> {
/// let client = Client::new()?;
///
/// let request = GenerationRequest::builder()
///     .message(Message::user("Tell me a story"))
///     .build();
///
/// let mut stream = client.generate(request).await?;
/// while let Some(event) = stream.next().await {
///     println!("{:?}", event?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn HttpClient>,
}

impl Client {
    /// Create a client with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client from a configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a client builder
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Generate a response, selecting the text or image path by model
    ///
    /// Text-capable models produce a lazy stream of deltas; image
    /// models produce exactly one [`StreamEvent::Image`] item.
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationStream> {
        let resolved = self.config.catalog.resolve(request.model.as_ref());

        match resolved.capability {
            Capability::Text => self.stream_text(request).await,
            Capability::Image => {
                let image = self.generate_image(request).await?;
                let events: Vec<Result<StreamEvent>> = vec![Ok(StreamEvent::Image(image))];
                Ok(Box::pin(futures::stream::iter(events)))
            }
        }
    }

    /// Stream a text generation as it is produced
    pub async fn stream_text(&self, request: GenerationRequest) -> Result<GenerationStream> {
        let transport = self.transport_for(&request)?;
        let headers = request_headers(Some(self.config.headers.clone()));
        let body = convert::text_payload(&request.messages)?;

        let bytes = try_candidates(&self.config.text_endpoints, |endpoint| {
            let transport = Arc::clone(&transport);
            let headers = headers.clone();
            let body = body.clone();
            async move { transport.post_stream(&endpoint, headers, body).await }
        })
        .await?;

        Ok(Box::pin(SseStream::new(bytes)))
    }

    /// Generate an image from the prompt (the last message's content)
    pub async fn generate_image(&self, request: GenerationRequest) -> Result<ImageResult> {
        let prompt = request
            .prompt()
            .ok_or_else(|| {
                Error::Configuration("image generation requires at least one message".to_string())
            })?
            .to_string();

        let transport = self.transport_for(&request)?;
        let headers = request_headers(Some(self.config.headers.clone()));
        let body = convert::image_payload(&prompt)?;

        let response: Value = try_candidates(&self.config.image_endpoints, |endpoint| {
            let transport = Arc::clone(&transport);
            let headers = headers.clone();
            let body = body.clone();
            async move { transport.post_json(&endpoint, headers, body).await }
        })
        .await?;

        parser::parse_image_response(response, &prompt)
    }

    /// Run a text generation to completion and return the joined text
    pub async fn collect_text(&self, request: GenerationRequest) -> Result<String> {
        let mut stream = self.stream_text(request).await?;
        let mut accumulator = StreamAccumulator::new();

        while let Some(event) = stream.next().await {
            accumulator.process_event(event?);
        }

        Ok(accumulator.text().to_string())
    }

    /// Pick the transport for one call
    ///
    /// A per-request proxy overrides the client transport; reqwest
    /// binds proxies at client build time, so such calls get a
    /// dedicated transport.
    fn transport_for(&self, request: &GenerationRequest) -> Result<Arc<dyn HttpClient>> {
        match request.proxy.as_deref() {
            Some(proxy) => Ok(Arc::new(ReqwestClient::with_proxy(proxy)?)),
            None => Ok(Arc::clone(&self.transport)),
        }
    }
}

/// Builder for [`Client`]
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn HttpClient>>,
}

impl ClientBuilder {
    /// Start from a complete configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the text endpoint set
    pub fn text_endpoints(mut self, urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.text_endpoints = EndpointSet::new(urls);
        self
    }

    /// Replace the image endpoint set
    pub fn image_endpoints(mut self, urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.image_endpoints = EndpointSet::new(urls);
        self
    }

    /// Replace the extra request headers
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.config.headers = headers;
        self
    }

    /// Set a client-level proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Replace the model catalog
    pub fn catalog(mut self, catalog: ModelCatalog) -> Self {
        self.config.catalog = catalog;
        self
    }

    /// Use a custom transport instead of the built-in reqwest client
    pub fn transport(mut self, transport: Arc<dyn HttpClient>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    ///
    /// Without an injected transport this constructs the default
    /// reqwest transport, honoring the client-level proxy.
    pub fn build(self) -> Result<Client> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => match self.config.proxy.as_deref() {
                Some(proxy) => Arc::new(ReqwestClient::with_proxy(proxy)?),
                None => Arc::new(ReqwestClient::new()?),
            },
        };

        Ok(Client {
            config: self.config,
            transport,
        })
    }
}
