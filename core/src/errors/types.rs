//! Token error kinds raised while issuing, validating and revoking tokens.

use thiserror::Error;

/// Token-related errors
///
/// None of these are retried internally. Token errors surface as
/// authentication failures; revocation write errors as bad requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },

    #[error("Token expired")]
    TokenExpired,

    #[error("Failed to revoke token: {message}")]
    RevocationWriteFailed { message: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn missing_claim(claim: &str) -> Self {
        TokenError::MissingClaim {
            claim: claim.to_string(),
        }
    }

    /// Whether this error means the token itself is not acceptable
    /// (malformed, forged, revoked or lacking required claims).
    pub fn is_invalid_token(&self) -> bool {
        matches!(
            self,
            TokenError::InvalidTokenFormat
                | TokenError::InvalidSignature
                | TokenError::TokenRevoked
                | TokenError::MissingClaim { .. }
        )
    }

    /// HTTP status equivalent for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TokenError::RevocationWriteFailed { .. } => 400,
            TokenError::TokenGenerationFailed => 500,
            _ => 401,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_token_group() {
        assert!(TokenError::InvalidTokenFormat.is_invalid_token());
        assert!(TokenError::InvalidSignature.is_invalid_token());
        assert!(TokenError::TokenRevoked.is_invalid_token());
        assert!(TokenError::missing_claim("iat").is_invalid_token());
        assert!(!TokenError::TokenExpired.is_invalid_token());
        assert!(!TokenError::RevocationWriteFailed { message: String::new() }.is_invalid_token());
    }

    #[test]
    fn test_missing_claim_message() {
        assert_eq!(TokenError::missing_claim("exp").to_string(), "Missing claim: exp");
    }
}
