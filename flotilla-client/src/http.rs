//! HTTP client abstraction and utilities

use bytes::Bytes;
use flotilla_core::{Error, Result};
use futures::{Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::pin::Pin;
use std::time::Duration;

use crate::constants::DEFAULT_TIMEOUT_SECS;

/// Type alias for raw response byte streams
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// HTTP transport abstraction
///
/// Implementations report an unreachable endpoint as
/// [`Error::Transport`] and a reachable endpoint answering with an
/// error status as [`Error::Http`]; the dispatcher relies on that
/// distinction to decide between failover and fail-fast.
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a POST request and decode the JSON response body
    async fn post_json(&self, url: &str, headers: HeaderMap, body: Value) -> Result<Value>;

    /// Send a POST request and return the raw response byte stream
    async fn post_stream(&self, url: &str, headers: HeaderMap, body: Value)
        -> Result<ByteStream>;
}

/// Default HTTP client implementation using reqwest
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = builder().build().map_err(build_error)?;
        Ok(Self { client })
    }

    /// Create a new HTTP client that routes every request through a proxy
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| Error::Configuration(format!("Invalid proxy URL: {}", e)))?;
        let client = builder().proxy(proxy).build().map_err(build_error)?;
        Ok(Self { client })
    }
}

fn builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder().timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

fn build_error(error: reqwest::Error) -> Error {
    Error::Configuration(format!("Failed to build HTTP client: {}", error))
}

fn transport_error(endpoint: &str, error: reqwest::Error) -> Error {
    Error::Transport {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}

async fn check_status(endpoint: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Http {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    })
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn post_json(&self, url: &str, headers: HeaderMap, body: Value) -> Result<Value> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let response = check_status(url, response).await?;

        response.json().await.map_err(|e| Error::Decode {
            message: format!("Invalid JSON response body: {}", e),
            source: Some(Box::new(e)),
        })
    }

    async fn post_stream(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Value,
    ) -> Result<ByteStream> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let response = check_status(url, response).await?;

        let endpoint = url.to_string();
        Ok(Box::pin(response.bytes_stream().map(move |chunk| {
            chunk.map_err(|e| transport_error(&endpoint, e))
        })))
    }
}

/// Helper to create common request headers
///
/// Every request carries a JSON content type and a wildcard accept;
/// `additional` lets the caller layer service-specific headers on top.
pub fn request_headers(additional: Option<HeaderMap>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

    if let Some(additional) = additional {
        headers.extend(additional);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::header::HeaderName;

    #[test]
    fn test_request_headers_defaults() {
        let headers = request_headers(None);

        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(ACCEPT).unwrap(), "*/*");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_request_headers_merges_additional() {
        let mut additional = HeaderMap::new();
        additional.insert(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://app.example"),
        );

        let headers = request_headers(Some(additional));

        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get("origin").unwrap(), "https://app.example");
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_request_headers_additional_wins_on_conflict() {
        let mut additional = HeaderMap::new();
        additional.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

        let headers = request_headers(Some(additional));
        assert_eq!(headers.get(ACCEPT).unwrap(), "text/event-stream");
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestClient::new().is_ok());
        assert!(ReqwestClient::with_proxy("http://localhost:8080").is_ok());
    }

    #[test]
    fn test_invalid_proxy_is_a_configuration_error() {
        match ReqwestClient::with_proxy("not a proxy url") {
            Err(Error::Configuration(msg)) => assert!(msg.contains("Invalid proxy URL")),
            other => panic!("Expected Configuration error, got {:?}", other.map(|_| ())),
        }
    }
}
