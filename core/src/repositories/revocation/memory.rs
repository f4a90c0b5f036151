//! In-memory implementation of RevocationStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::revocation::{NewRevocation, RevocationRecord};
use crate::errors::DomainError;

use super::r#trait::RevocationStore;

#[derive(Default)]
struct Blacklist {
    records: HashMap<String, RevocationRecord>,
    last_id: u64,
}

/// Process-local revocation store, used for tests and single-instance setups
#[derive(Clone, Default)]
pub struct InMemoryRevocationStore {
    inner: Arc<RwLock<Blacklist>>,
}

impl InMemoryRevocationStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Snapshot of all records ordered by id
    pub async fn records(&self) -> Vec<RevocationRecord> {
        let blacklist = self.inner.read().await;
        let mut records: Vec<_> = blacklist.records.values().cloned().collect();
        records.sort_by_key(|record| record.id);
        records
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn find_by_jti(&self, jti: &str) -> Result<Option<RevocationRecord>, DomainError> {
        let blacklist = self.inner.read().await;
        Ok(blacklist.records.get(jti).cloned())
    }

    async fn insert(&self, revocation: NewRevocation) -> Result<RevocationRecord, DomainError> {
        let mut blacklist = self.inner.write().await;

        if blacklist.records.contains_key(&revocation.jti) {
            return Err(DomainError::Validation {
                message: format!("Revocation already recorded for jti {}", revocation.jti),
            });
        }

        blacklist.last_id += 1;
        let record = revocation.into_record(blacklist.last_id);
        blacklist.records.insert(record.jti.clone(), record.clone());
        Ok(record)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut blacklist = self.inner.write().await;
        let initial_count = blacklist.records.len();

        blacklist.records.retain(|_, record| !record.is_expired_at(now));

        Ok(initial_count - blacklist.records.len())
    }
}
