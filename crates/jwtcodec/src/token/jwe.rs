use crate::algorithm::{
    AlgorithmPolicy, AlgorithmSuite, AlgorithmType, ContentEncryption, JweAlgorithm, TokenKind,
    jwe_algorithm,
};
use crate::claims::ClaimSet;
use crate::envelope::{HeaderSegment, SealedContent};
use crate::error::{Error, Result};
use crate::header::Header;
use crate::limits::MAX_DECODED_PAYLOAD_SIZE;
use crate::token::{TokenState, check_length};

use chrono::{DateTime, Utc};

/// Encrypted five-segment token: `header.encryptedKey.iv.ciphertext.tag`
///
/// A decoded token carries no claims until [`validate`](Self::validate)
/// has unwrapped the key, opened the ciphertext and checked `exp`.
pub struct JweToken {
    algorithm: &'static dyn JweAlgorithm,
    key: Vec<u8>,
    claims: Option<ClaimSet>,
    compact: Option<JweCompact>,
    state: TokenState,
}

struct JweCompact {
    header: HeaderSegment,
    sealed: SealedContent,
    raw: String,
}

impl JweToken {
    /// Prepare a token for encryption to the holder of `key`
    ///
    /// `key` is the recipient's RSA public key (or a PKCS#8 private key,
    /// whose public half is used).
    pub fn new(suite: &AlgorithmSuite, claims: ClaimSet, key: impl Into<Vec<u8>>) -> Result<Self> {
        Ok(Self {
            algorithm: jwe_algorithm(suite)?,
            key: key.into(),
            claims: Some(claims),
            compact: None,
            state: TokenState::Initialized,
        })
    }

    /// Encrypt the canonical claims and assemble the compact string
    pub fn encode(&mut self) -> Result<&str> {
        let claims = match (self.state, &self.claims) {
            (TokenState::Initialized, Some(claims)) => claims,
            (TokenState::Encoded, _) => return Ok(self.raw().unwrap_or_default()),
            _ => return Err(Error::InvalidState("encode requires a token built from claims")),
        };

        let header = HeaderSegment::serialize(Header::jwe(
            self.algorithm.algorithm(),
            self.algorithm.encryption(),
        ))?;
        let plaintext = claims.canonical_encode()?;
        if plaintext.len() > MAX_DECODED_PAYLOAD_SIZE {
            return Err(Error::TokenTooLarge {
                size: plaintext.len(),
                max: MAX_DECODED_PAYLOAD_SIZE,
            });
        }
        let sealed = self
            .algorithm
            .encrypt(&self.key, header.encoded().as_bytes(), &plaintext)?;

        let [encrypted_key, iv, ciphertext, tag] = sealed.encode();
        let raw = format!(
            "{}.{encrypted_key}.{iv}.{ciphertext}.{tag}",
            header.encoded()
        );
        check_length(&raw)?;

        self.state = TokenState::Encoded;
        Ok(&self
            .compact
            .insert(JweCompact {
                header,
                sealed,
                raw,
            })
            .raw)
    }

    /// Parse a five-segment compact string
    pub fn decode(
        compact: &str,
        key: impl Into<Vec<u8>>,
        policy: &AlgorithmPolicy,
    ) -> Result<Self> {
        let parts: Vec<&str> = compact.split('.').collect();
        let [header, encrypted_key, iv, ciphertext, tag] = parts[..] else {
            return Err(Error::MalformedToken { parts: parts.len() });
        };
        Self::from_parts(
            compact,
            [header, encrypted_key, iv, ciphertext, tag],
            key.into(),
            policy,
        )
    }

    pub(crate) fn from_parts(
        compact: &str,
        [header, encrypted_key, iv, ciphertext, tag]: [&str; 5],
        key: Vec<u8>,
        policy: &AlgorithmPolicy,
    ) -> Result<Self> {
        let header = HeaderSegment::deserialize(header)?;
        let algorithm: AlgorithmType = header.algorithm()?.parse()?;
        policy.validate(&algorithm)?;
        if algorithm.kind()? != TokenKind::Jwe {
            return Err(Error::MalformedToken {
                parts: TokenKind::Jwe.segments(),
            });
        }

        let encryption: ContentEncryption = header
            .encryption_algorithm()?
            .ok_or_else(|| Error::MissingHeaderField("enc".to_string()))?
            .parse()?;
        let suite = AlgorithmSuite::jwe(algorithm, encryption);

        Ok(Self {
            algorithm: jwe_algorithm(&suite)?,
            key,
            claims: None,
            compact: Some(JweCompact {
                header,
                sealed: SealedContent::decode(encrypted_key, iv, ciphertext, tag)?,
                raw: compact.to_string(),
            }),
            state: TokenState::Decoded,
        })
    }

    /// Unwrap the content key, open the ciphertext, then check `exp`
    ///
    /// Claims become available only when every step succeeds.
    pub fn validate(&mut self) -> Result<()> {
        self.validate_at(Utc::now())
    }

    /// [`validate`](Self::validate) against a fixed clock
    pub fn validate_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        let compact = match (self.state, &self.compact) {
            (TokenState::Decoded | TokenState::Validated, Some(compact)) => compact,
            _ => return Err(Error::InvalidState("validate requires a decoded token")),
        };
        self.claims = None;
        self.state = TokenState::Decoded;

        let plaintext = self.algorithm.decrypt(
            &self.key,
            compact.header.encoded().as_bytes(),
            &compact.sealed,
        )?;
        let claims = ClaimSet::from_json(&plaintext)?;
        claims.check_expiry(now)?;

        self.claims = Some(claims);
        self.state = TokenState::Validated;
        Ok(())
    }

    pub fn suite(&self) -> AlgorithmSuite {
        AlgorithmSuite::jwe(self.algorithm.algorithm(), self.algorithm.encryption())
    }

    /// Claims, unless the token is decoded but not yet validated
    pub fn claims(&self) -> Option<&ClaimSet> {
        self.claims.as_ref()
    }

    pub fn header(&self) -> Option<&Header> {
        self.compact.as_ref().map(|compact| compact.header.header())
    }

    pub fn raw(&self) -> Option<&str> {
        self.compact.as_ref().map(|compact| compact.raw.as_str())
    }

    pub fn state(&self) -> TokenState {
        self.state
    }
}

impl std::fmt::Debug for JweToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JweToken")
            .field("suite", &self.suite())
            .field("state", &self.state)
            .field("claims", &self.claims.as_ref().map(ClaimSet::len))
            .finish_non_exhaustive()
    }
}
