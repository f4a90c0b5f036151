//! Request and response bodies

pub mod auth;

pub use auth::{LogoutResponse, SessionResponse};
pub use jm_shared::ErrorResponse;
