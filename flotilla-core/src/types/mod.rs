//! Core types used throughout the flotilla library

pub mod event;
pub mod message;
pub mod request;

// Common type aliases
/// A fully-formed service URL (e.g., "https://llm-1.example.com/api/chat")
pub type EndpointUrl = String;
