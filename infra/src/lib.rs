//! # Infrastructure Layer
//!
//! Concrete infrastructure for the JwtManager workspace:
//! - **Database**: MySQL connection pool using SQLx
//! - **Revocation store**: MySQL implementation of `RevocationStore` over the
//!   configurable blacklist table
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use std::sync::Arc;

use jm_core::services::token::{TokenManager, TokenManagerConfig};

// Re-export core types for convenience
pub use jm_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration management for infrastructure services
    //!
    //! Re-exports the shared loaders so callers only depend on this crate.

    pub use jm_shared::config::{AppConfig, DatabaseConfig, JwtConfig};
}

#[cfg(feature = "mysql")]
use database::{DatabasePool, MySqlRevocationStore};

/// Token manager backed by the MySQL blacklist
#[cfg(feature = "mysql")]
pub type MySqlTokenManager = TokenManager<Arc<MySqlRevocationStore>>;

/// Infrastructure service container
#[cfg(feature = "mysql")]
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Shared connection pool
    pub pool: DatabasePool,
    /// Revocation store over the configured blacklist table
    pub revocation_store: Arc<MySqlRevocationStore>,
}

#[cfg(feature = "mysql")]
impl InfrastructureServices {
    /// Build a token manager sharing this container's revocation store
    pub fn token_manager(
        &self,
        jwt: &config::JwtConfig,
    ) -> Result<MySqlTokenManager, InfrastructureError> {
        TokenManager::new(self.revocation_store.clone(), TokenManagerConfig::from(jwt))
            .map_err(|e| InfrastructureError::Config(e.to_string()))
    }
}

/// Initialize infrastructure services
///
/// Creates the database pool and the revocation store over
/// `config.database.blacklist_table`.
#[cfg(feature = "mysql")]
pub async fn initialize(
    config: &config::AppConfig,
) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let pool = DatabasePool::new(config.database.clone()).await?;
    let revocation_store = MySqlRevocationStore::with_table(
        pool.get_pool().clone(),
        config.database.blacklist_table.as_str(),
    )?;

    tracing::info!(table = %revocation_store.table(), "Infrastructure services initialized");

    Ok(InfrastructureServices {
        pool,
        revocation_store: Arc::new(revocation_store),
    })
}

/// Load application configuration from environment
///
/// Reads a `.env` file first when one is present.
pub fn load_config() -> Result<config::AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let config = config::AppConfig::from_env();

    if config.jwt.secret.is_empty() {
        return Err(InfrastructureError::Config("JWT_SECRET must not be empty".to_string()));
    }
    if config.is_production() && config.jwt.is_using_default_secret() {
        return Err(InfrastructureError::Config(
            "JWT_SECRET must be set in production".to_string(),
        ));
    }

    Ok(config)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
