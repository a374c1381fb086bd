//! Wire response parsing

use flotilla_core::{Error, ImageResult, Result};
use serde::Deserialize;
use serde_json::Value;

/// Payload of one `data:` stream line
#[derive(Debug, Deserialize)]
pub struct StreamPayload {
    /// Generated text carried by this line, if any
    pub data: Option<String>,
}

/// One URL or several; the service sends either form
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UrlValue {
    /// A single URL
    One(String),
    /// A list of URLs
    Many(Vec<String>),
}

impl UrlValue {
    /// Normalize into a list of URLs
    pub fn into_vec(self) -> Vec<String> {
        match self {
            UrlValue::One(url) => vec![url],
            UrlValue::Many(urls) => urls,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageResponseBody {
    image_url: Option<UrlValue>,
}

/// Parse an image generation response body
///
/// The body must carry an `image_url` field holding one URL or an array
/// of URLs; `alt` becomes the alt text of the result.
pub fn parse_image_response(body: Value, alt: &str) -> Result<ImageResult> {
    let parsed: ImageResponseBody = serde_json::from_value(body)?;

    let urls = parsed.image_url.ok_or_else(|| Error::MissingField {
        field: "image_url".to_string(),
    })?;

    Ok(ImageResult {
        urls: urls.into_vec(),
        alt: alt.to_string(),
    })
}
