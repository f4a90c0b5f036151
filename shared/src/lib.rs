//! Shared configuration and common types for the JwtManager workspace
//!
//! This crate provides functionality used across all workspace members:
//! - Configuration types loaded from the environment
//! - The JSON error body returned by the HTTP layer

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    DatabaseConfig, JwtConfig, ServerConfig, LoggingConfig
};
pub use errors::{ErrorResponse, error_codes};
