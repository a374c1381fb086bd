//! Constants for the default service catalog and transport defaults

/// Default replica endpoints for streamed text generation
pub const DEFAULT_TEXT_ENDPOINTS: [&str; 3] = [
    "https://gen-1.flotilla.dev/api/chat",
    "https://gen-2.flotilla.dev/api/chat",
    "https://gen-3.flotilla.dev/api/chat",
];

/// Default replica endpoints for image generation
pub const DEFAULT_IMAGE_ENDPOINTS: [&str; 3] = [
    "https://gen-1.flotilla.dev/api/image",
    "https://gen-2.flotilla.dev/api/image",
    "https://gen-3.flotilla.dev/api/image",
];

/// Default text model
pub const DEFAULT_TEXT_MODEL: &str = "TextGenerations";

/// Default image model
pub const DEFAULT_IMAGE_MODEL: &str = "ImageGenerations";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Length of the request cipher carried by every payload
pub const CIPHER_LENGTH: usize = 16;
