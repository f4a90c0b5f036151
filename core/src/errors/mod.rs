//! Domain-specific error types and error handling.

mod types;

pub use types::TokenError;

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// HTTP status equivalent for this error
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Validation { .. } => 400,
            DomainError::Internal { .. } => 500,
            DomainError::Token(token_error) => token_error.status_code(),
        }
    }

    /// The token error carried by this error, if any
    pub fn as_token_error(&self) -> Option<&TokenError> {
        match self {
            DomainError::Token(token_error) => Some(token_error),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(DomainError::from(TokenError::InvalidSignature).status_code(), 401);
        assert_eq!(DomainError::from(TokenError::TokenExpired).status_code(), 401);
        assert_eq!(
            DomainError::from(TokenError::RevocationWriteFailed {
                message: "duplicate".to_string()
            })
            .status_code(),
            400
        );
        assert_eq!(
            DomainError::Internal { message: "db down".to_string() }.status_code(),
            500
        );
    }

    #[test]
    fn test_token_error_is_transparent() {
        let error = DomainError::from(TokenError::TokenRevoked);
        assert_eq!(error.to_string(), "Token revoked");
        assert!(matches!(error.as_token_error(), Some(TokenError::TokenRevoked)));
    }
}
