//! Phase-typed token builder
//!
//! Each phase is its own type, so serializing before claims are attached or
//! validating before decoding does not compile:
//!
//! ```text
//! Unconfigured -> WithKey -> WithClaims -> Serialized
//! Unconfigured -> Decoded -> Validated
//! ```
//!
//! ```compile_fail
//! use jwtcodec::{AlgorithmType, TokenBuilder};
//!
//! let builder = TokenBuilder::new().jws(AlgorithmType::HS256, "TEST").unwrap();
//! builder.serialize(); // no claims attached
//! ```

use crate::algorithm::{AlgorithmPolicy, AlgorithmSuite, AlgorithmType, ContentEncryption, TokenKind};
use crate::claims::ClaimSet;
use crate::error::{Error, Result};
use crate::token::Token;

/// Fluent token builder; `P` is the current phase
#[derive(Debug)]
pub struct TokenBuilder<P> {
    phase: P,
}

/// Nothing chosen yet
#[derive(Debug, Default)]
pub struct Unconfigured;

/// Algorithm suite and key chosen
pub struct WithKey {
    suite: AlgorithmSuite,
    key: Vec<u8>,
}

/// Claims attached, ready to serialize
pub struct WithClaims {
    suite: AlgorithmSuite,
    key: Vec<u8>,
    claims: ClaimSet,
}

/// Compact string produced
#[derive(Debug)]
pub struct Serialized {
    token: Token,
}

/// Parsed from a compact string, not yet validated
#[derive(Debug)]
pub struct Decoded {
    token: Token,
}

/// Validated token with trusted claims
#[derive(Debug)]
pub struct Validated {
    token: Token,
    claims: ClaimSet,
}

impl TokenBuilder<Unconfigured> {
    pub fn new() -> Self {
        Self {
            phase: Unconfigured,
        }
    }

    /// Start a signed token
    pub fn jws(self, algorithm: AlgorithmType, key: impl Into<Vec<u8>>) -> Result<TokenBuilder<WithKey>> {
        if algorithm.kind()? != TokenKind::Jws {
            return Err(Error::UnsupportedAlgorithm(format!(
                "{algorithm} is not a JWS algorithm"
            )));
        }
        Ok(TokenBuilder {
            phase: WithKey {
                suite: AlgorithmSuite::jws(algorithm),
                key: key.into(),
            },
        })
    }

    /// Start an encrypted token for the holder of `key`
    pub fn jwe(
        self,
        algorithm: AlgorithmType,
        encryption: ContentEncryption,
        key: impl Into<Vec<u8>>,
    ) -> Result<TokenBuilder<WithKey>> {
        if algorithm.kind()? != TokenKind::Jwe {
            return Err(Error::UnsupportedAlgorithm(format!(
                "{algorithm} is not a JWE algorithm"
            )));
        }
        Ok(TokenBuilder {
            phase: WithKey {
                suite: AlgorithmSuite::jwe(algorithm, encryption),
                key: key.into(),
            },
        })
    }

    /// Decode a compact token, accepting every registered algorithm
    pub fn decode(self, compact: &str, key: impl Into<Vec<u8>>) -> Result<TokenBuilder<Decoded>> {
        self.decode_with_policy(compact, key, &AlgorithmPolicy::allow_all())
    }

    /// Decode a compact token, rejecting algorithms outside `policy`
    pub fn decode_with_policy(
        self,
        compact: &str,
        key: impl Into<Vec<u8>>,
        policy: &AlgorithmPolicy,
    ) -> Result<TokenBuilder<Decoded>> {
        let token = Token::decode_with_policy(compact, key, policy)?;
        Ok(TokenBuilder {
            phase: Decoded { token },
        })
    }
}

impl Default for TokenBuilder<Unconfigured> {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBuilder<WithKey> {
    /// Attach claims
    pub fn add_claims(self, claims: ClaimSet) -> Result<TokenBuilder<WithClaims>> {
        let WithKey { suite, key } = self.phase;
        Ok(TokenBuilder {
            phase: WithClaims {
                suite,
                key,
                claims,
            },
        })
    }

    pub fn suite(&self) -> AlgorithmSuite {
        self.phase.suite
    }
}

impl TokenBuilder<WithClaims> {
    /// Attach more claims; a name already present fails with `DuplicateClaim`
    pub fn add_claims(mut self, claims: ClaimSet) -> Result<Self> {
        for (name, value) in claims {
            self.phase.claims.add(name, value)?;
        }
        Ok(self)
    }

    pub fn claims(&self) -> &ClaimSet {
        &self.phase.claims
    }

    /// Sign or encrypt and produce the compact string
    pub fn serialize(self) -> Result<TokenBuilder<Serialized>> {
        let WithClaims { suite, key, claims } = self.phase;
        let mut token = Token::new(&suite, claims, key)?;
        token.encode()?;
        Ok(TokenBuilder {
            phase: Serialized { token },
        })
    }
}

impl TokenBuilder<Serialized> {
    pub fn as_str(&self) -> &str {
        self.phase.token.raw().unwrap_or_default()
    }

    pub fn into_string(self) -> String {
        self.as_str().to_string()
    }

    pub fn token(&self) -> &Token {
        &self.phase.token
    }
}

impl std::fmt::Display for TokenBuilder<Serialized> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TokenBuilder<Decoded> {
    pub fn kind(&self) -> TokenKind {
        self.phase.token.kind()
    }

    pub fn suite(&self) -> AlgorithmSuite {
        self.phase.token.suite()
    }

    /// Claims as received, not yet verified
    ///
    /// `None` for an encrypted token until it is validated.
    pub fn claims(&self) -> Option<&ClaimSet> {
        self.phase.token.claims()
    }

    /// Verify signature or decrypt, then check `exp`
    pub fn validate(self) -> Result<TokenBuilder<Validated>> {
        let mut token = self.phase.token;
        token.validate()?;

        let claims = token
            .claims()
            .cloned()
            .ok_or(Error::InvalidState("validated token has no claims"))?;
        Ok(TokenBuilder {
            phase: Validated { token, claims },
        })
    }
}

impl TokenBuilder<Validated> {
    /// Trusted claims
    pub fn claims(&self) -> &ClaimSet {
        &self.phase.claims
    }

    pub fn into_claims(self) -> ClaimSet {
        self.phase.claims
    }

    pub fn token(&self) -> &Token {
        &self.phase.token
    }
}

impl std::fmt::Debug for WithKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithKey")
            .field("suite", &self.suite)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for WithClaims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithClaims")
            .field("suite", &self.suite)
            .field("claims", &self.claims.len())
            .finish_non_exhaustive()
    }
}
