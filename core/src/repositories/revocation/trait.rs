//! Revocation store trait defining the interface for the token blacklist.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::revocation::{NewRevocation, RevocationRecord};
use crate::errors::DomainError;

/// Persistence contract for revoked token identifiers
///
/// Every validation performs a point lookup by `jti`; every revocation
/// performs one insert. The store's uniqueness constraint on `jti` is the
/// only guard against two concurrent revocations of the same token, so
/// `insert` must reject a duplicate `jti` rather than succeed twice.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Find the most recent revocation record for a token identifier
    ///
    /// # Returns
    /// * `Ok(Some(RevocationRecord))` - The token has been revoked
    /// * `Ok(None)` - No revocation recorded
    /// * `Err(DomainError)` - Store unavailable
    async fn find_by_jti(&self, jti: &str) -> Result<Option<RevocationRecord>, DomainError>;

    /// Persist a new revocation
    ///
    /// # Returns
    /// * `Ok(RevocationRecord)` - The stored record with its assigned id
    /// * `Err(DomainError)` - Duplicate `jti` or store failure
    async fn insert(&self, revocation: NewRevocation) -> Result<RevocationRecord, DomainError>;

    /// Delete records whose token expired before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Check whether a token identifier has been revoked
    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_jti(jti).await?.is_some())
    }
}

#[async_trait]
impl<S: RevocationStore + ?Sized> RevocationStore for Arc<S> {
    async fn find_by_jti(&self, jti: &str) -> Result<Option<RevocationRecord>, DomainError> {
        (**self).find_by_jti(jti).await
    }

    async fn insert(&self, revocation: NewRevocation) -> Result<RevocationRecord, DomainError> {
        (**self).insert(revocation).await
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        (**self).delete_expired(now).await
    }
}
