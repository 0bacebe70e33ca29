//! HS256 bearer-token helpers for HTTP services
//!
//! Thin wrappers over [`TokenBuilder`] for the common case of a service
//! issuing and checking its own HS256 tokens from a shared secret.

use crate::algorithm::{AlgorithmPolicy, AlgorithmType};
use crate::builder::TokenBuilder;
use crate::claims::{ClaimSet, RegisteredClaim};
use crate::error::{Error, Result};

use chrono::Utc;
use tracing::{debug, warn};

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn extract_bearer(authorization: &str) -> Result<&str> {
    let token = authorization
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty() && !token.contains(char::is_whitespace));

    token.ok_or_else(|| {
        warn!("authorization header is malformed");
        Error::MalformedAuthorization
    })
}

/// Claims for a service-issued token: `aud` and `sub` set to `service`,
/// `iat` set to now
pub fn service_claims(service: &str) -> Result<ClaimSet> {
    let mut claims = ClaimSet::new();
    claims.add(RegisteredClaim::Audience.as_str(), service)?;
    claims.add(RegisteredClaim::Subject.as_str(), service)?;
    claims.add_timestamp(RegisteredClaim::IssuedAt, Utc::now())?;
    Ok(claims)
}

/// Issue an HS256 token over `claims`
pub fn issue_hs256(secret: impl Into<Vec<u8>>, claims: ClaimSet) -> Result<String> {
    let claim_count = claims.len();
    let token = TokenBuilder::new()
        .jws(AlgorithmType::HS256, secret)?
        .add_claims(claims)?
        .serialize()
        .inspect_err(|e| warn!(error = %e, "failed to issue bearer token"))?
        .into_string();

    debug!(claims = claim_count, "issued bearer token");
    Ok(token)
}

/// Validate an HS256 token and return its claims
///
/// Only HS256 is accepted, so `none` and RSA tokens are rejected with
/// `AlgorithmNotAllowed`.
pub fn verify_hs256(secret: impl Into<Vec<u8>>, token: &str) -> Result<ClaimSet> {
    let claims = TokenBuilder::new()
        .decode_with_policy(token, secret, &AlgorithmPolicy::hs256_only())?
        .validate()?
        .into_claims();
    Ok(claims)
}

/// `true` if `token` is a valid HS256 token for `secret`; logs the reason otherwise
pub fn is_valid_hs256(secret: impl Into<Vec<u8>>, token: &str) -> bool {
    match verify_hs256(secret, token) {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "bearer token rejected");
            false
        }
    }
}
