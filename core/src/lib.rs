//! # JwtManager Core
//!
//! Issues, verifies and revokes compact HMAC-SHA256 session tokens.
//! This crate contains the token entities, the revocation store interface
//! with an in-memory implementation, error types and the `TokenManager`.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
