//! Segment encoding helpers for compact `header.payload.signature` tokens.
//!
//! These functions are pure: nothing here touches the signing secret or
//! the revocation store.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

/// URL-safe alphabet, never pads on encode, accepts padded or unpadded input
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Three dot-separated segments of base64 characters, either alphabet
static TOKEN_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9\-_=+/]{4,}\.[A-Za-z0-9\-_=+/]{4,}\.[A-Za-z0-9\-_=+/]{4,}$")
        .expect("token format pattern is valid")
});

/// The three raw segments of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenParts<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
}

impl<'a> TokenParts<'a> {
    /// The bytes covered by the signature: `header + "." + payload`
    pub fn signing_input(&self) -> String {
        signing_input(self.header, self.payload)
    }
}

/// Base64url-encodes `data` without padding
pub fn base64_url_encode(data: impl AsRef<[u8]>) -> String {
    URL_SAFE_LENIENT.encode(data)
}

/// Decodes a base64url segment.
///
/// Standard-alphabet characters (`+`, `/`) and trailing `=` padding are
/// tolerated.
pub fn base64_url_decode(data: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_LENIENT
        .decode(normalize_segment(data))
        .map_err(|_| TokenError::InvalidTokenFormat)
}

/// Canonical form of a segment: URL-safe alphabet with padding removed
pub fn normalize_segment(segment: &str) -> String {
    to_url_safe(segment.trim_end_matches('='))
}

fn to_url_safe(segment: &str) -> String {
    segment
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Canonical form of a signature segment
///
/// An HMAC-SHA256 digest encodes to 43 characters, so at most a single
/// trailing `=` is stripped. Anything else stays and fails verification.
pub fn normalize_signature(segment: &str) -> String {
    to_url_safe(segment.strip_suffix('=').unwrap_or(segment))
}

/// Structural check performed before any cryptographic work
pub fn is_well_formed(token: &str) -> bool {
    TOKEN_FORMAT.is_match(token)
}

/// Splits a token into exactly three segments
pub fn split_token(token: &str) -> Result<TokenParts<'_>, TokenError> {
    let mut segments = token.split('.');
    match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(header), Some(payload), Some(signature), None) => Ok(TokenParts {
            header,
            payload,
            signature,
        }),
        _ => Err(TokenError::InvalidTokenFormat),
    }
}

pub fn signing_input(header: &str, payload: &str) -> String {
    format!("{}.{}", header, payload)
}

/// Decodes a single payload segment into claims
pub fn decode_claims(segment: &str) -> Result<Claims, TokenError> {
    let bytes = base64_url_decode(segment)?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(Claims::new(map)),
        _ => Err(TokenError::InvalidTokenFormat),
    }
}

/// Decodes the payload of a token without verifying signature or time.
///
/// The returned claims carry no trust guarantee.
pub fn decode_payload(token: &str) -> Result<Claims, TokenError> {
    let parts = split_token(token)?;
    decode_claims(parts.payload)
}
