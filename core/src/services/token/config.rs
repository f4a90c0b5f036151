//! Configuration for the token manager

use jm_shared::config::JwtConfig;

use crate::errors::DomainError;

/// Immutable configuration for a `TokenManager` instance
#[derive(Debug, Clone)]
pub struct TokenManagerConfig {
    /// Shared HMAC secret
    pub secret: String,
    /// Issuer context written to `iss`
    pub issuer: String,
    /// Token lifetime in seconds
    pub expire_seconds: i64,
    /// Renewal window in seconds, counted from issue time
    pub renew_seconds: i64,
}

impl TokenManagerConfig {
    /// Creates a configuration with the default durations (900s / 300s)
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            expire_seconds: 900,
            renew_seconds: 300,
        }
    }

    pub fn with_expire_seconds(mut self, seconds: i64) -> Self {
        self.expire_seconds = seconds;
        self
    }

    pub fn with_renew_seconds(mut self, seconds: i64) -> Self {
        self.renew_seconds = seconds;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), DomainError> {
        if self.secret.is_empty() {
            return Err(DomainError::Validation {
                message: "Token secret must not be empty".to_string(),
            });
        }
        if self.expire_seconds <= 0 {
            return Err(DomainError::Validation {
                message: format!("expire_seconds must be positive, got {}", self.expire_seconds),
            });
        }
        if self.renew_seconds < 0 {
            return Err(DomainError::Validation {
                message: format!("renew_seconds must not be negative, got {}", self.renew_seconds),
            });
        }
        Ok(())
    }
}

impl From<&JwtConfig> for TokenManagerConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            expire_seconds: config.expire_seconds,
            renew_seconds: config.renew_seconds,
        }
    }
}
