//! Wire payload construction

use flotilla_core::{Message, Result};
use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::constants::CIPHER_LENGTH;

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    messages: &'a [Message],
    cipher: String,
}

#[derive(Debug, Serialize)]
struct ImageBody<'a> {
    prompt: &'a str,
    cipher: String,
}

/// Build the payload for a streamed text generation
pub fn text_payload(messages: &[Message]) -> Result<Value> {
    Ok(serde_json::to_value(TextBody {
        messages,
        cipher: generate_cipher(),
    })?)
}

/// Build the payload for an image generation
pub fn image_payload(prompt: &str) -> Result<Value> {
    Ok(serde_json::to_value(ImageBody {
        prompt,
        cipher: generate_cipher(),
    })?)
}

/// A fresh request cipher of 16 random ASCII digits
pub fn generate_cipher() -> String {
    let mut rng = rand::thread_rng();
    (0..CIPHER_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0u8..10)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_cipher_shape() {
        let cipher = generate_cipher();
        assert_eq!(cipher.len(), CIPHER_LENGTH);
        assert!(cipher.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_ciphers_are_fresh_per_call() {
        let ciphers: std::collections::HashSet<String> =
            (0..10).map(|_| generate_cipher()).collect();
        assert!(ciphers.len() > 1, "10 ciphers in a row were identical");
    }

    #[test]
    fn test_text_payload_shape() {
        let messages = vec![Message::system("Be brief"), Message::user("Hello")];
        let payload = text_payload(&messages).unwrap();

        assert_eq!(
            payload["messages"],
            json!([
                {"role": "system", "content": "Be brief"},
                {"role": "user", "content": "Hello"}
            ])
        );

        let cipher = payload["cipher"].as_str().unwrap();
        assert_eq!(cipher.len(), CIPHER_LENGTH);
        assert!(cipher.chars().all(|c| c.is_ascii_digit()));

        assert_eq!(payload.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_image_payload_shape() {
        let payload = image_payload("a sunset over water").unwrap();

        assert_eq!(payload["prompt"], "a sunset over water");
        assert!(payload["cipher"].is_string());
        assert_eq!(payload.as_object().unwrap().len(), 2);
    }
}
