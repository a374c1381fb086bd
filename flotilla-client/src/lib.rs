//! Resilient delivery for replicated generation services
//!
//! This crate carries the transport side of flotilla: randomized
//! endpoint selection over a set of functionally-equivalent replicas,
//! sequential dispatch with transport failover, and lazy decoding of
//! the service's streamed responses.

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod constants;
pub mod convert;
pub mod dispatch;
pub mod endpoints;
pub mod http;
pub mod models;
pub mod parser;
pub mod sse;
pub mod stream;

// Re-export the high-level API
pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use endpoints::EndpointSet;
pub use models::{ModelCatalog, ResolvedModel};
pub use stream::GenerationStream;

// Re-export the transport seam for custom implementations
pub use http::{ByteStream, HttpClient, ReqwestClient};
