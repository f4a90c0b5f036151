//! Token signing configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Configuration for issuing and validating session tokens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret used to sign tokens
    pub secret: String,

    /// Issuer context written to the `iss` claim
    pub issuer: String,

    /// Token lifetime in seconds
    #[serde(default = "default_expire_seconds")]
    pub expire_seconds: i64,

    /// Seconds after issue at which clients should refresh
    #[serde(default = "default_renew_seconds")]
    pub renew_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            issuer: String::from("jwt-manager"),
            expire_seconds: default_expire_seconds(),
            renew_seconds: default_renew_seconds(),
        }
    }
}

impl JwtConfig {
    /// Create a new configuration with secret and issuer
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        let issuer = std::env::var("JWT_ISSUER")
            .unwrap_or_else(|_| "jwt-manager".to_string());
        let expire_seconds = std::env::var("JWT_EXPIRE_SECONDS")
            .unwrap_or_else(|_| "900".to_string())
            .parse()
            .unwrap_or(900);
        let renew_seconds = std::env::var("JWT_RENEW_SECONDS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .unwrap_or(300);

        Self {
            secret,
            issuer,
            expire_seconds,
            renew_seconds,
        }
    }

    /// Set token lifetime in seconds
    pub fn with_expire_seconds(mut self, seconds: i64) -> Self {
        self.expire_seconds = seconds;
        self
    }

    /// Set renewal window in seconds
    pub fn with_renew_seconds(mut self, seconds: i64) -> Self {
        self.renew_seconds = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

fn default_expire_seconds() -> i64 {
    900 // 15 minutes
}

fn default_renew_seconds() -> i64 {
    300 // 5 minutes
}
