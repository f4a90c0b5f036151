//! MySQL implementation of the RevocationStore trait.
//!
//! Revoked token identifiers live in a single blacklist table:
//!
//! | column       | type                         |
//! |--------------|------------------------------|
//! | `id`         | BIGINT UNSIGNED, auto-increment primary key |
//! | `user_id`    | BIGINT UNSIGNED, indexed     |
//! | `jti`        | VARCHAR(250), unique         |
//! | `expires_at` | DATETIME                     |
//! | `created_at` | DATETIME                     |
//!
//! The table name comes from configuration, so it is validated as a plain
//! identifier before being interpolated into any statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::{MySqlPool, Row};
use tracing::{debug, error, instrument};

use jm_core::domain::entities::revocation::{NewRevocation, RevocationRecord};
use jm_core::errors::DomainError;
use jm_core::repositories::RevocationStore;
use jm_shared::config::DEFAULT_BLACKLIST_TABLE;

use crate::InfrastructureError;

static TABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").expect("table name pattern is valid"));

/// Statements rendered once for the configured table
#[derive(Debug, Clone)]
struct Statements {
    find_by_jti: String,
    insert: String,
    delete_expired: String,
}

impl Statements {
    fn for_table(table: &str) -> Self {
        Self {
            find_by_jti: format!(
                "SELECT id, user_id, jti, expires_at, created_at FROM `{}` WHERE jti = ? ORDER BY id DESC LIMIT 1",
                table
            ),
            insert: format!(
                "INSERT INTO `{}` (user_id, jti, expires_at, created_at) VALUES (?, ?, ?, ?)",
                table
            ),
            delete_expired: format!("DELETE FROM `{}` WHERE expires_at < ?", table),
        }
    }
}

/// MySQL implementation of RevocationStore
#[derive(Clone)]
pub struct MySqlRevocationStore {
    /// Database connection pool
    pool: MySqlPool,
    table: String,
    statements: Statements,
}

impl MySqlRevocationStore {
    /// Create a store over the default `oauth_jwt_blacklist` table
    pub fn new(pool: MySqlPool) -> Self {
        Self::build(pool, DEFAULT_BLACKLIST_TABLE.to_string())
    }

    /// Create a store over a configured table
    ///
    /// # Errors
    /// `InfrastructureError::Config` when `table` is not a plain SQL identifier
    pub fn with_table(pool: MySqlPool, table: impl Into<String>) -> Result<Self, InfrastructureError> {
        let table = table.into();
        validate_table_name(&table)?;
        Ok(Self::build(pool, table))
    }

    fn build(pool: MySqlPool, table: String) -> Self {
        let statements = Statements::for_table(&table);
        Self {
            pool,
            table,
            statements,
        }
    }

    /// Name of the blacklist table
    pub fn table(&self) -> &str {
        &self.table
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RevocationRecord, DomainError> {
        Ok(RevocationRecord {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?,
            user_id: row
                .try_get("user_id")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get user_id: {}", e) })?,
            jti: row
                .try_get("jti")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get jti: {}", e) })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get expires_at: {}", e) })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
        })
    }
}

/// Checks that a configured table name is safe to interpolate
pub fn validate_table_name(table: &str) -> Result<(), InfrastructureError> {
    if TABLE_NAME.is_match(table) {
        Ok(())
    } else {
        Err(InfrastructureError::Config(format!(
            "Invalid blacklist table name: {:?}",
            table
        )))
    }
}

#[async_trait]
impl RevocationStore for MySqlRevocationStore {
    #[instrument(skip(self))]
    async fn find_by_jti(&self, jti: &str) -> Result<Option<RevocationRecord>, DomainError> {
        let result = sqlx::query(&self.statements.find_by_jti)
            .bind(jti)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(table = %self.table, error = %e, "Revocation lookup failed");
                DomainError::Internal { message: format!("Failed to find revocation: {}", e) }
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, revocation), fields(jti = %revocation.jti))]
    async fn insert(&self, revocation: NewRevocation) -> Result<RevocationRecord, DomainError> {
        let result = sqlx::query(&self.statements.insert)
            .bind(revocation.user_id)
            .bind(&revocation.jti)
            .bind(revocation.expires_at)
            .bind(revocation.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let duplicate = e
                    .as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false);

                if duplicate {
                    DomainError::Validation {
                        message: format!("Revocation already recorded for jti {}", revocation.jti),
                    }
                } else {
                    DomainError::Internal { message: format!("Failed to save revocation: {}", e) }
                }
            })?;

        let id = result.last_insert_id();
        debug!(id, "Revocation stored");

        Ok(revocation.into_record(id))
    }

    #[instrument(skip(self))]
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query(&self.statements.delete_expired)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete expired revocations: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }
}
