//! Token manager implementation

use chrono::{TimeZone, Utc};
use jsonwebtoken::{crypto, Algorithm, DecodingKey, EncodingKey};
use serde_json::{Map, Value};
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use crate::domain::entities::revocation::{NewRevocation, MAX_JTI_LENGTH};
use crate::domain::entities::token::{claims, Claims, Header};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::RevocationStore;

use super::codec::{self, TokenParts};
use super::config::TokenManagerConfig;

/// Issues, validates and revokes HMAC-SHA256 session tokens
///
/// Each instance owns exactly one secret and issuer. Revocation state lives
/// in the injected store; the manager itself holds no mutable state.
pub struct TokenManager<S: RevocationStore> {
    store: S,
    config: TokenManagerConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl<S: RevocationStore> TokenManager<S> {
    /// Creates a new token manager
    ///
    /// # Arguments
    ///
    /// * `store` - Revocation store consulted on every validation
    /// * `config` - Secret, issuer and durations
    ///
    /// # Returns
    ///
    /// A new `TokenManager`, or `DomainError::Validation` when the
    /// configuration is unusable
    pub fn new(store: S, config: TokenManagerConfig) -> DomainResult<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            store,
            config,
            encoding_key,
            decoding_key,
        })
    }

    pub fn config(&self) -> &TokenManagerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Configured token lifetime in seconds
    pub fn expire_seconds(&self) -> i64 {
        self.config.expire_seconds
    }

    /// Configured renewal window in seconds
    pub fn renew_seconds(&self) -> i64 {
        self.config.renew_seconds
    }

    pub fn issuer(&self) -> &str {
        &self.config.issuer
    }

    /// Mints a signed token
    ///
    /// Caller claims are applied first and the reserved claims (`aud`,
    /// `exp`, `iat`, `jti`, `iss`, `sub`) are written over them, so a caller
    /// can never override a reserved claim.
    ///
    /// # Arguments
    ///
    /// * `audience` - Value of `aud`
    /// * `subject` - Value of `sub`, may be empty
    /// * `extra_claims` - Additional claims merged into the payload
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - `header.payload.signature`
    /// * `Err(DomainError)` - Encoding or signing failed
    #[instrument(skip(self, extra_claims))]
    pub fn generate(
        &self,
        audience: &str,
        subject: &str,
        extra_claims: Map<String, Value>,
    ) -> DomainResult<String> {
        let now = Utc::now().timestamp();
        let expires_at = now
            .checked_add(self.config.expire_seconds)
            .ok_or(TokenError::TokenGenerationFailed)?;

        let overridden = claims::RESERVED
            .iter()
            .filter(|name| extra_claims.contains_key(**name))
            .count();
        if overridden > 0 {
            debug!(overridden, "Reserved claims supplied by caller were overwritten");
        }

        let mut payload = Claims::new(extra_claims);
        payload.insert(claims::AUDIENCE, Value::from(audience));
        payload.insert(claims::EXPIRES_AT, Value::from(expires_at));
        payload.insert(claims::ISSUED_AT, Value::from(now));
        payload.insert(claims::TOKEN_ID, Value::from(Self::new_jti(now)));
        payload.insert(claims::ISSUER, Value::from(self.config.issuer.as_str()));
        payload.insert(claims::SUBJECT, Value::from(subject));

        let header = Self::encode_segment(&Header::default())?;
        let payload = Self::encode_segment(&payload)?;
        let signature = self.sign(&header, &payload)?;

        debug!("Issued token");
        Ok(format!("{}.{}.{}", header, payload, signature))
    }

    /// Checks structure, signature and revocation status of a token
    ///
    /// Expiry is not checked here; combine with [`Self::is_on_time`].
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Token is authentic and not revoked
    /// * `Err(DomainError::Token(_))` - Malformed, forged, lacking `jti` or revoked
    /// * `Err(DomainError::Internal)` - Revocation store unavailable
    #[instrument(skip(self, token))]
    pub async fn is_valid(&self, token: &str) -> DomainResult<bool> {
        if !codec::is_well_formed(token) {
            warn!("Rejected malformed token");
            return Err(TokenError::InvalidTokenFormat.into());
        }

        let parts = codec::split_token(token)?;
        self.verify_signature(&parts)?;

        let payload = codec::decode_claims(parts.payload)?;
        let jti = payload
            .jti()
            .ok_or_else(|| TokenError::missing_claim(claims::TOKEN_ID))?;

        let revoked = self.store.find_by_jti(jti).await.map_err(|e| {
            error!(jti = %jti, error = %e, "Revocation lookup failed");
            e
        })?;

        if revoked.is_some() {
            warn!(jti = %jti, "Rejected revoked token");
            return Err(TokenError::TokenRevoked.into());
        }

        debug!(jti = %jti, "Token is valid");
        Ok(true)
    }

    /// Permanently revokes a token
    ///
    /// The token must first pass [`Self::is_valid`], so revoking the same
    /// token twice fails the second time with `TokenRevoked`.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Revocation durably recorded
    /// * `Err(TokenError::RevocationWriteFailed)` - The store rejected the insert
    #[instrument(skip(self, token))]
    pub async fn turn_invalid(&self, token: &str) -> DomainResult<bool> {
        self.is_valid(token).await?;

        let payload = self.decode_payload(token)?;
        let jti = payload
            .jti()
            .ok_or_else(|| TokenError::missing_claim(claims::TOKEN_ID))?;

        if jti.len() > MAX_JTI_LENGTH {
            return Err(TokenError::RevocationWriteFailed {
                message: format!("jti exceeds {} characters", MAX_JTI_LENGTH),
            }
            .into());
        }

        let exp = payload
            .exp()
            .ok_or_else(|| TokenError::missing_claim(claims::EXPIRES_AT))?;
        let expires_at = Utc.timestamp_opt(exp, 0).single().ok_or_else(|| {
            TokenError::RevocationWriteFailed {
                message: format!("exp {} is not a valid timestamp", exp),
            }
        })?;

        let user_id = payload.user_id().ok_or_else(|| TokenError::RevocationWriteFailed {
            message: "sub is not a numeric user id".to_string(),
        })?;

        let record = self
            .store
            .insert(NewRevocation::new(user_id, jti, expires_at))
            .await
            .map_err(|e| {
                error!(jti = %jti, error = %e, "Failed to record revocation");
                TokenError::RevocationWriteFailed {
                    message: e.to_string(),
                }
            })?;

        debug!(jti = %record.jti, id = record.id, "Token revoked");
        Ok(true)
    }

    /// Checks that the token has not expired
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Current time is not past `exp`
    /// * `Err(TokenError::MissingClaim)` - `iat` or `exp` absent or empty
    /// * `Err(TokenError::TokenExpired)` - Current time is past `exp`
    pub fn is_on_time(&self, token: &str) -> DomainResult<bool> {
        let payload = self.decode_payload(token)?;
        let (_, exp) = Self::issue_window(&payload)?;

        if Utc::now().timestamp() > exp {
            return Err(TokenError::TokenExpired.into());
        }

        Ok(true)
    }

    /// Whether the renewal window (`iat + renew_seconds`) has passed
    ///
    /// Does not fail on expiry.
    pub fn token_need_to_refresh(&self, token: &str) -> DomainResult<bool> {
        let payload = self.decode_payload(token)?;
        let (iat, _) = Self::issue_window(&payload)?;

        Ok(Utc::now().timestamp() > iat.saturating_add(self.config.renew_seconds))
    }

    /// Decodes the payload without signature or time verification
    pub fn decode_payload(&self, token: &str) -> DomainResult<Claims> {
        codec::decode_payload(token).map_err(DomainError::from)
    }

    /// Checks the store for a revoked token identifier
    pub async fn is_revoked(&self, jti: &str) -> DomainResult<bool> {
        self.store.is_revoked(jti).await
    }

    /// Removes revocation records for tokens that have expired anyway
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of records removed
    #[instrument(skip(self))]
    pub async fn purge_expired_revocations(&self) -> DomainResult<usize> {
        let deleted = self.store.delete_expired(Utc::now()).await?;
        debug!(deleted, "Purged expired revocations");
        Ok(deleted)
    }

    fn issue_window(payload: &Claims) -> Result<(i64, i64), TokenError> {
        let iat = payload
            .iat()
            .ok_or_else(|| TokenError::missing_claim(claims::ISSUED_AT))?;
        let exp = payload
            .exp()
            .ok_or_else(|| TokenError::missing_claim(claims::EXPIRES_AT))?;
        Ok((iat, exp))
    }

    fn new_jti(issued_at: i64) -> String {
        format!("{}{}", issued_at, Uuid::new_v4().simple())
    }

    fn encode_segment<T: serde::Serialize>(value: &T) -> Result<String, TokenError> {
        serde_json::to_vec(value)
            .map(codec::base64_url_encode)
            .map_err(|_| TokenError::TokenGenerationFailed)
    }

    fn sign(&self, header: &str, payload: &str) -> Result<String, TokenError> {
        crypto::sign(
            codec::signing_input(header, payload).as_bytes(),
            &self.encoding_key,
            Algorithm::HS256,
        )
        .map_err(|_| TokenError::TokenGenerationFailed)
    }

    // Compared in canonical unpadded URL-safe form; one `=` of padding is tolerated.
    fn verify_signature(&self, parts: &TokenParts<'_>) -> Result<(), TokenError> {
        let signature = codec::normalize_signature(parts.signature);
        let verified = crypto::verify(
            &signature,
            parts.signing_input().as_bytes(),
            &self.decoding_key,
            Algorithm::HS256,
        )
        .unwrap_or(false);

        if verified {
            Ok(())
        } else {
            warn!("Rejected token with invalid signature");
            Err(TokenError::InvalidSignature)
        }
    }
}
