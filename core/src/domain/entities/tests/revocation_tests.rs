//! Unit tests for revocation entities

use chrono::{Duration, Utc};

use crate::domain::entities::revocation::NewRevocation;

#[test]
fn test_new_revocation_into_record() {
    let expires_at = Utc::now() + Duration::minutes(15);
    let revocation = NewRevocation::new(7, "1700000000abcdef", expires_at);
    let created_at = revocation.created_at;

    let record = revocation.into_record(3);

    assert_eq!(record.id, 3);
    assert_eq!(record.user_id, 7);
    assert_eq!(record.jti, "1700000000abcdef");
    assert_eq!(record.expires_at, expires_at);
    assert_eq!(record.created_at, created_at);
    assert!(!record.is_expired());
}

#[test]
fn test_record_expiry() {
    let record = NewRevocation::new(1, "jti", Utc::now() - Duration::seconds(5)).into_record(1);
    assert!(record.is_expired());
    assert!(!record.is_expired_at(record.expires_at));
    assert!(record.is_expired_at(record.expires_at + Duration::seconds(1)));
}
