//! Flotilla - A resilient client for replicated generation services
//!
//! This crate provides a small, type-safe client for text and image
//! generation services that are replicated across several interchangeable
//! endpoints. Every call draws a fresh random endpoint order, fails over
//! past unreachable replicas, and decodes streaming responses
//! incrementally.
//!
//! # Features
//!
//! - **Randomized selection**: Each call shuffles the replica list before dialing
//! - **Transparent failover**: Unreachable replicas are skipped until one answers
//! - **Streaming**: Text arrives as incremental deltas decoded from `data:` framed lines
//! - **Image generation**: Same call surface, routed by model capability
//! - **Extensible**: Bring your own transport by implementing `HttpClient`
//!
//! # Quick Start
//!
//! ```no_run
//! # use flotilla::prelude::*;
//! # use futures::StreamExt;
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), flotilla::Error> {
//! let client = Client::new()?;
//!
//! let request = GenerationRequest::builder()
//!     .message(Message::user("Hello, world!"))
//!     .build();
//!
//! let mut stream = client.generate(request).await?;
//! while let Some(event) = stream.next().await {
//!     if let StreamEvent::Delta(delta) = event? {
//!         print!("{}", delta.text);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export core types
pub use flotilla_core::*;

// Re-export feature-gated modules
#[cfg(feature = "client")]
#[cfg_attr(docsrs, doc(cfg(feature = "client")))]
pub mod client {
    //! Endpoint selection, resilient dispatch, and stream decoding
    pub use flotilla_client::*;
}

/// Prelude module for convenient imports
pub mod prelude {

    pub use flotilla_core::{
        Error, GenerationRequest, ImageResult, Message, Model, Role, StreamAccumulator,
        StreamEvent, TextDelta,
    };

    #[cfg(feature = "client")]
    pub use flotilla_client::{Client, ClientConfig};
}
