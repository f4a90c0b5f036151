//! Token manager module
//!
//! This module handles all token-related operations including:
//! - Canonical encoding of header and payload segments
//! - HMAC-SHA256 signing and signature verification
//! - Expiry and renewal-window checks
//! - Revocation through the injected `RevocationStore`

pub mod codec;
mod config;
mod manager;


pub use codec::{base64_url_decode, base64_url_encode, decode_payload};
pub use config::TokenManagerConfig;
pub use manager::TokenManager;
