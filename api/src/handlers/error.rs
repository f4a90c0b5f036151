//! Mapping from domain errors to HTTP responses.

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use jm_core::errors::{DomainError, TokenError};
use jm_shared::{error_codes, ErrorResponse};

/// Error raised by the HTTP layer
#[derive(Debug)]
pub enum ApiError {
    /// No usable `Authorization: Bearer` header
    MissingToken,
    /// Failure reported by the token manager
    Domain(DomainError),
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::Domain(error)
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingToken => write!(f, "Missing bearer token"),
            ApiError::Domain(error) => write!(f, "{}", error),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::Domain(error) => StatusCode::from_u16(error.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::MissingToken => {
                ErrorResponse::new(error_codes::UNAUTHORIZED, "Missing or invalid Authorization header")
            }
            ApiError::Domain(error) => domain_error_body(error),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Machine-readable code for a domain error
pub fn error_code(error: &DomainError) -> &'static str {
    match error {
        DomainError::Token(TokenError::TokenExpired) => error_codes::TOKEN_EXPIRED,
        DomainError::Token(TokenError::TokenRevoked) => error_codes::TOKEN_REVOKED,
        DomainError::Token(TokenError::RevocationWriteFailed { .. }) => error_codes::REVOCATION_FAILED,
        DomainError::Token(TokenError::TokenGenerationFailed) => error_codes::INTERNAL_ERROR,
        DomainError::Token(_) => error_codes::TOKEN_INVALID,
        DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
        DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
    }
}

fn domain_error_body(error: &DomainError) -> ErrorResponse {
    match error {
        DomainError::Internal { .. } | DomainError::Token(TokenError::TokenGenerationFailed) => {
            tracing::error!(error = %error, "Request failed");
            ErrorResponse::new(error_code(error), "An internal error occurred")
        }
        DomainError::Token(TokenError::RevocationWriteFailed { .. }) => {
            tracing::error!(error = %error, "Revocation failed");
            ErrorResponse::new(error_code(error), "Failed to revoke token")
        }
        _ => {
            tracing::debug!(error = %error, "Request rejected");
            ErrorResponse::new(error_code(error), error.to_string())
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    ApiError::from(error).error_response()
}
