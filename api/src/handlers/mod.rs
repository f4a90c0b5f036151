//! Request handler helpers shared by all routes

pub mod error;

pub use error::{handle_domain_error, ApiError};
