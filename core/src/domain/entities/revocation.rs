//! Revocation records persisted in the token blacklist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a `jti` accepted by the blacklist
pub const MAX_JTI_LENGTH: usize = 250;

/// A revoked token, as stored in the blacklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRecord {
    /// Store-assigned, monotonically increasing identifier
    pub id: u64,

    /// Subject of the revoked token
    pub user_id: u64,

    /// Unique token identifier
    pub jti: String,

    /// When the revoked token would have expired on its own
    pub expires_at: DateTime<Utc>,

    /// When the token was revoked
    pub created_at: DateTime<Utc>,
}

impl RevocationRecord {
    /// Whether the revoked token has passed its own expiry
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// A revocation not yet written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRevocation {
    pub user_id: u64,
    pub jti: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl NewRevocation {
    /// Creates a revocation stamped with the current time
    pub fn new(user_id: u64, jti: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            jti: jti.into(),
            expires_at,
            created_at: Utc::now(),
        }
    }

    /// Attaches the identifier assigned by the store
    pub fn into_record(self, id: u64) -> RevocationRecord {
        RevocationRecord {
            id,
            user_id: self.user_id,
            jti: self.jti,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}
