//! Claim set with canonical, order-independent serialization

use crate::error::{Error, Result};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Registered claim names (RFC 7519 section 4.1)
///
/// Informational only: any other claim name is accepted by [`ClaimSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisteredClaim {
    Issuer,
    Subject,
    Audience,
    ExpiresAt,
    NotBefore,
    IssuedAt,
    JwtId,
}

impl RegisteredClaim {
    /// Claim name as it appears in the payload
    pub const fn as_str(&self) -> &'static str {
        match self {
            RegisteredClaim::Issuer => "iss",
            RegisteredClaim::Subject => "sub",
            RegisteredClaim::Audience => "aud",
            RegisteredClaim::ExpiresAt => "exp",
            RegisteredClaim::NotBefore => "nbf",
            RegisteredClaim::IssuedAt => "iat",
            RegisteredClaim::JwtId => "jti",
        }
    }
}

impl std::fmt::Display for RegisteredClaim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for RegisteredClaim {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Mapping from claim name to JSON value
///
/// Keys are unique. The canonical encoding sorts object keys by byte value
/// at every nesting level, so the signed or encrypted bytes do not depend on
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimSet {
    claims: BTreeMap<String, Value>,
}

impl ClaimSet {
    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a claim, failing if the name is already present
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let name = name.into();
        if self.claims.contains_key(&name) {
            return Err(Error::DuplicateClaim(name));
        }
        self.claims.insert(name, value.into());
        Ok(())
    }

    /// Add a timestamp claim as an RFC3339 string with second precision
    pub fn add_timestamp(&mut self, claim: RegisteredClaim, at: DateTime<Utc>) -> Result<()> {
        self.add(claim.as_str(), at.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Remove a claim, failing if it is absent
    pub fn remove(&mut self, name: &str) -> Result<Value> {
        self.claims
            .remove(name)
            .ok_or_else(|| Error::ClaimNotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Claim value if it is a JSON string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.claims.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    /// Parse an RFC3339 timestamp claim
    ///
    /// Returns `Ok(None)` when the claim is absent and `InvalidClaim` when it
    /// is present but not an RFC3339 string.
    pub fn timestamp(&self, claim: RegisteredClaim) -> Result<Option<DateTime<Utc>>> {
        let Some(value) = self.claims.get(claim.as_str()) else {
            return Ok(None);
        };

        let text = value.as_str().ok_or_else(|| Error::InvalidClaim {
            claim: claim.to_string(),
            reason: "expected an RFC3339 timestamp string".to_string(),
        })?;

        DateTime::parse_from_rfc3339(text)
            .map(|parsed| Some(parsed.with_timezone(&Utc)))
            .map_err(|e| Error::InvalidClaim {
                claim: claim.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fail with `TokenExpired` if `exp` is present and before `now`
    pub fn check_expiry(&self, now: DateTime<Utc>) -> Result<()> {
        match self.timestamp(RegisteredClaim::ExpiresAt)? {
            Some(expires_at) if expires_at < now => Err(Error::TokenExpired {
                expired_at: expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            }),
            _ => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Iterate claims in canonical (sorted) order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.claims.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Canonical JSON: keys sorted ascending by byte value at every level
    pub fn canonical_encode(&self) -> Result<Vec<u8>> {
        let object = self
            .claims
            .iter()
            .map(|(name, value)| (name.clone(), canonicalize(value)))
            .collect::<Map<String, Value>>();

        serde_json::to_vec(&Value::Object(object))
            .map_err(|e| Error::InvalidJson(format!("claim encoding failed: {e}")))
    }

    /// Replace the contents of this set with the claims in `bytes`
    ///
    /// The set is cleared first; on error it is left empty.
    pub fn decode(&mut self, bytes: &[u8]) -> Result<()> {
        self.claims.clear();

        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::InvalidJson(format!("claims: {e}")))?;
        let Value::Object(object) = value else {
            return Err(Error::InvalidJson("claims: expected a JSON object".to_string()));
        };

        self.claims.extend(object);
        Ok(())
    }

    /// Parse a claim set from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let mut claims = Self::new();
        claims.decode(bytes)?;
        Ok(claims)
    }
}

impl FromIterator<(String, Value)> for ClaimSet {
    /// Collect claims; a repeated name keeps the last value
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            claims: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ClaimSet {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.into_iter()
    }
}

/// Rebuild nested objects with sorted keys
///
/// `serde_json::Map` keeps insertion order when `preserve_order` is enabled
/// anywhere in the dependency graph, so sorting is done explicitly.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut entries: Vec<_> = object.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(name, nested)| (name.clone(), canonicalize(nested)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
