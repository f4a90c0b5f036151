//! Token entities for compact HMAC-signed session tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Signing algorithm tag written to every header
pub const ALGORITHM: &str = "HS256";

/// Token type tag written to every header
pub const TOKEN_TYPE: &str = "JWT";

/// Reserved claim names
pub mod claims {
    pub const AUDIENCE: &str = "aud";
    pub const EXPIRES_AT: &str = "exp";
    pub const ISSUED_AT: &str = "iat";
    pub const TOKEN_ID: &str = "jti";
    pub const ISSUER: &str = "iss";
    pub const SUBJECT: &str = "sub";

    /// Claims always set by the issuer, overriding caller-supplied values
    pub const RESERVED: [&str; 6] = [AUDIENCE, EXPIRES_AT, ISSUED_AT, TOKEN_ID, ISSUER, SUBJECT];
}

/// Token header segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Algorithm tag
    pub alg: String,

    /// Type tag
    pub typ: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }
}

/// Token payload: an arbitrary JSON object carrying the reserved claims
/// alongside any caller-supplied claims.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Wraps an existing claim map
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Sets a claim, replacing any previous value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    /// Raw claim lookup
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Audience (`aud`)
    pub fn aud(&self) -> Option<&str> {
        self.str_claim(claims::AUDIENCE)
    }

    /// Subject (`sub`)
    pub fn sub(&self) -> Option<&str> {
        self.str_claim(claims::SUBJECT)
    }

    /// Token identifier (`jti`), `None` when absent or empty
    pub fn jti(&self) -> Option<&str> {
        self.str_claim(claims::TOKEN_ID).filter(|jti| !jti.is_empty())
    }

    /// Issuer (`iss`)
    pub fn iss(&self) -> Option<&str> {
        self.str_claim(claims::ISSUER)
    }

    /// Issued-at epoch seconds (`iat`)
    pub fn iat(&self) -> Option<i64> {
        self.timestamp_claim(claims::ISSUED_AT)
    }

    /// Expiry epoch seconds (`exp`)
    pub fn exp(&self) -> Option<i64> {
        self.timestamp_claim(claims::EXPIRES_AT)
    }

    /// Numeric user id carried in `sub`.
    ///
    /// An absent or empty subject maps to `0`; a subject that is not an
    /// unsigned integer yields `None`.
    pub fn user_id(&self) -> Option<u64> {
        match self.get(claims::SUBJECT) {
            None | Some(Value::Null) => Some(0),
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) if s.trim().is_empty() => Some(0),
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(_) => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    fn str_claim(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    // Numbers and numeric strings are both accepted; null, zero and empty
    // values count as absent.
    fn timestamp_claim(&self, name: &str) -> Option<i64> {
        let value = match self.get(name)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }?;

        (value != 0).then_some(value)
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Claims> for Map<String, Value> {
    fn from(claims: Claims) -> Self {
        claims.0
    }
}
