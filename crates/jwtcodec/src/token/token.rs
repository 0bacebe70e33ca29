use crate::algorithm::{AlgorithmPolicy, AlgorithmSuite, TokenKind};
use crate::claims::ClaimSet;
use crate::error::{Error, Result};
use crate::token::{JweToken, JwsToken, TokenState, check_length};

use chrono::{DateTime, Utc};
use tracing::debug;

/// A signed or encrypted token
///
/// The variant is chosen by the algorithm suite when building, and by the
/// number of compact segments when decoding (3 for JWS, 5 for JWE).
///
/// # Example
///
/// ```
/// use jwtcodec::{AlgorithmSuite, AlgorithmType, ClaimSet, Token};
///
/// let mut claims = ClaimSet::new();
/// claims.add("aud", "developers")?;
///
/// let mut token = Token::new(&AlgorithmSuite::jws(AlgorithmType::HS256), claims, "TEST")?;
/// let compact = token.encode()?.to_string();
///
/// let mut decoded = Token::decode(&compact, "TEST")?;
/// decoded.validate()?;
/// assert_eq!(decoded.claims().and_then(|c| c.get_str("aud")), Some("developers"));
/// # Ok::<(), jwtcodec::Error>(())
/// ```
#[derive(Debug)]
pub enum Token {
    Jws(JwsToken),
    Jwe(JweToken),
}

impl Token {
    /// Build a token for encoding
    ///
    /// The suite's primary algorithm decides the token kind. A signing
    /// algorithm paired with a content-encryption algorithm is rejected.
    pub fn new(
        suite: &AlgorithmSuite,
        claims: ClaimSet,
        key: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let kind = suite.kind()?;
        debug!(%suite, ?kind, "creating token");

        match kind {
            TokenKind::Jws => {
                if let Some(encryption) = suite.encryption() {
                    return Err(Error::UnsupportedAlgorithm(format!(
                        "{} does not take a content-encryption algorithm ({encryption})",
                        suite.algorithm()
                    )));
                }
                JwsToken::new(suite.algorithm(), claims, key).map(Token::Jws)
            }
            TokenKind::Jwe => JweToken::new(suite, claims, key).map(Token::Jwe),
        }
    }

    /// Decode a compact token, accepting every registered algorithm
    ///
    /// This includes `none`; use [`decode_with_policy`](Self::decode_with_policy)
    /// to restrict algorithms for untrusted input.
    pub fn decode(compact: &str, key: impl Into<Vec<u8>>) -> Result<Self> {
        Self::decode_with_policy(compact, key, &AlgorithmPolicy::allow_all())
    }

    /// Decode a compact token, rejecting algorithms outside `policy`
    pub fn decode_with_policy(
        compact: &str,
        key: impl Into<Vec<u8>>,
        policy: &AlgorithmPolicy,
    ) -> Result<Self> {
        check_length(compact)?;

        let parts: Vec<&str> = compact.split('.').collect();
        debug!(parts = parts.len(), "decoding compact token");

        match parts[..] {
            [header, payload, signature] => {
                JwsToken::from_parts(compact, [header, payload, signature], key.into(), policy)
                    .map(Token::Jws)
            }
            [header, encrypted_key, iv, ciphertext, tag] => JweToken::from_parts(
                compact,
                [header, encrypted_key, iv, ciphertext, tag],
                key.into(),
                policy,
            )
            .map(Token::Jwe),
            _ => Err(Error::MalformedToken { parts: parts.len() }),
        }
    }

    /// Produce the compact serialization
    pub fn encode(&mut self) -> Result<&str> {
        match self {
            Token::Jws(token) => token.encode(),
            Token::Jwe(token) => token.encode(),
        }
    }

    /// Verify integrity and freshness of a decoded token
    pub fn validate(&mut self) -> Result<()> {
        self.validate_at(Utc::now())
    }

    /// [`validate`](Self::validate) against a fixed clock
    pub fn validate_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        let result = match self {
            Token::Jws(token) => token.validate_at(now),
            Token::Jwe(token) => token.validate_at(now),
        };

        match &result {
            Ok(()) => debug!(kind = ?self.kind(), suite = %self.suite(), "token validated"),
            Err(e) => debug!(kind = ?self.kind(), error = %e, "token validation failed"),
        }
        result
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Jws(_) => TokenKind::Jws,
            Token::Jwe(_) => TokenKind::Jwe,
        }
    }

    pub fn suite(&self) -> AlgorithmSuite {
        match self {
            Token::Jws(token) => AlgorithmSuite::jws(token.algorithm()),
            Token::Jwe(token) => token.suite(),
        }
    }

    /// Claims, if available
    ///
    /// `None` only for a decoded JWE that has not been validated yet. JWS
    /// claims are readable right after decoding but are unverified until
    /// [`validate`](Self::validate) succeeds.
    pub fn claims(&self) -> Option<&ClaimSet> {
        match self {
            Token::Jws(token) => Some(token.claims()),
            Token::Jwe(token) => token.claims(),
        }
    }

    /// Compact string after encode or decode
    pub fn raw(&self) -> Option<&str> {
        match self {
            Token::Jws(token) => token.raw(),
            Token::Jwe(token) => token.raw(),
        }
    }

    pub fn state(&self) -> TokenState {
        match self {
            Token::Jws(token) => token.state(),
            Token::Jwe(token) => token.state(),
        }
    }
}
