//! Client configuration

use reqwest::header::HeaderMap;

use crate::constants::{DEFAULT_IMAGE_ENDPOINTS, DEFAULT_TEXT_ENDPOINTS};
use crate::endpoints::EndpointSet;
use crate::models::ModelCatalog;

/// Configuration for a [`Client`](crate::client::Client)
///
/// The defaults describe the public service replicas; every field can
/// be overridden for self-hosted or test deployments.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Replica endpoints serving streamed text generations
    pub text_endpoints: EndpointSet,
    /// Replica endpoints serving image generations
    pub image_endpoints: EndpointSet,
    /// Extra headers sent with every request
    pub headers: HeaderMap,
    /// Proxy URL applied to every call, unless overridden per request
    pub proxy: Option<String>,
    /// The model catalog requests are resolved against
    pub catalog: ModelCatalog,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            text_endpoints: EndpointSet::new(DEFAULT_TEXT_ENDPOINTS),
            image_endpoints: EndpointSet::new(DEFAULT_IMAGE_ENDPOINTS),
            headers: HeaderMap::new(),
            proxy: None,
            catalog: ModelCatalog::default(),
        }
    }
}

impl ClientConfig {
    /// Replace the text endpoint set
    pub fn with_text_endpoints(
        mut self,
        urls: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.text_endpoints = EndpointSet::new(urls);
        self
    }

    /// Replace the image endpoint set
    pub fn with_image_endpoints(
        mut self,
        urls: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.image_endpoints = EndpointSet::new(urls);
        self
    }

    /// Replace the extra request headers
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set a client-level proxy URL
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Replace the model catalog
    pub fn with_catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }
}
