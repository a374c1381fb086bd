//! Core types and errors for the flotilla client library
//!
//! This crate defines the data model shared by every part of the flotilla
//! ecosystem: generation requests, streamed output events, and the error
//! taxonomy. It performs no I/O of its own.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{EndpointFailure, Error, Result};
pub use types::{
    event::{ImageResult, StreamAccumulator, StreamEvent, TextDelta},
    message::{Message, Role},
    request::{BuildError, Capability, GenerationRequest, GenerationRequestBuilder, Model},
};
