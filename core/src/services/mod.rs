//! Business services containing token logic.

pub mod token;

// Re-export commonly used types
pub use token::{TokenManager, TokenManagerConfig};
