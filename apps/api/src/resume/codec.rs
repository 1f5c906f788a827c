//! Shareable token codec: JSON → UTF-8 bytes → Base64 with the URL-safe
//! alphabet substitution (`+`→`-`, `/`→`_`) and no `=` padding.
//!
//! The embed script served to third-party pages produces tokens with the same
//! algorithm, so the exact byte layout here is a wire contract.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use tracing::debug;

use crate::resume::model::Resume;
use crate::resume::normalize::normalize;

fn bytes_to_token(bytes: &[u8]) -> String {
    STANDARD
        .encode(bytes)
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

fn token_to_bytes(token: &str) -> Option<Vec<u8>> {
    let mut standard: String = token
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let padding = (4 - standard.len() % 4) % 4;
    standard.extend(std::iter::repeat('=').take(padding));

    match STANDARD.decode(standard.as_bytes()) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            debug!("codec: token is not valid base64: {e}");
            None
        }
    }
}

/// Encodes a document into a URL-safe token.
pub fn encode(resume: &Resume) -> String {
    bytes_to_token(&serde_json::to_vec(resume).unwrap_or_default())
}

/// Encodes an arbitrary JSON payload, as the embed script does for inline
/// `resumeData` that has not been normalized yet.
pub fn encode_value(value: &Value) -> String {
    bytes_to_token(value.to_string().as_bytes())
}

/// Decodes and normalizes a token. Any failure (alphabet, UTF-8, JSON)
/// yields `None`.
pub fn decode(token: &str) -> Option<Resume> {
    let bytes = token_to_bytes(token)?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("codec: decoded payload is not UTF-8: {e}");
            return None;
        }
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(value) => Some(normalize(&value)),
        Err(e) => {
            debug!("codec: decoded payload is not JSON: {e}");
            None
        }
    }
}
