use crate::algorithm::{AlgorithmPolicy, AlgorithmType, JwsAlgorithm, TokenKind, jws_algorithm};
use crate::claims::ClaimSet;
use crate::envelope::{HeaderSegment, PayloadSegment, SignatureSegment};
use crate::error::{Error, Result};
use crate::header::Header;
use crate::token::{TokenState, check_length};

use chrono::{DateTime, Utc};

/// Signed three-segment token: `header.payload.signature`
///
/// Claims are readable as soon as the token is decoded, but are only
/// trustworthy once [`validate`](Self::validate) has succeeded.
pub struct JwsToken {
    algorithm: &'static dyn JwsAlgorithm,
    key: Vec<u8>,
    claims: ClaimSet,
    compact: Option<JwsCompact>,
    state: TokenState,
}

/// Segments as encoded or as received
struct JwsCompact {
    header: HeaderSegment,
    payload: PayloadSegment,
    signature: SignatureSegment,
    raw: String,
}

impl JwsCompact {
    fn signing_input(&self) -> String {
        signing_input(&self.header, &self.payload)
    }
}

fn signing_input(header: &HeaderSegment, payload: &PayloadSegment) -> String {
    format!("{}.{}", header.encoded(), payload.encoded())
}

impl JwsToken {
    /// Prepare a token for encoding
    pub fn new(algorithm: AlgorithmType, claims: ClaimSet, key: impl Into<Vec<u8>>) -> Result<Self> {
        Ok(Self {
            algorithm: jws_algorithm(algorithm)?,
            key: key.into(),
            claims,
            compact: None,
            state: TokenState::Initialized,
        })
    }

    /// Sign header and payload and assemble the compact string
    ///
    /// Encoding twice returns the cached string. Tokens obtained through
    /// [`decode`](Self::decode) cannot be re-encoded.
    pub fn encode(&mut self) -> Result<&str> {
        match self.state {
            TokenState::Initialized => {}
            TokenState::Encoded => return Ok(self.raw().unwrap_or_default()),
            TokenState::Decoded | TokenState::Validated => {
                return Err(Error::InvalidState("encode requires a token built from claims"));
            }
        }

        let header = HeaderSegment::serialize(Header::jws(self.algorithm.algorithm()))?;
        let payload = PayloadSegment::serialize(self.claims.clone())?;

        let signing_input = signing_input(&header, &payload);
        let signature = self.algorithm.sign(&self.key, &signing_input)?;
        let signature = SignatureSegment::from_bytes(&signature);
        let raw = format!("{signing_input}.{}", signature.encoded());
        check_length(&raw)?;

        self.state = TokenState::Encoded;
        Ok(&self
            .compact
            .insert(JwsCompact {
                header,
                payload,
                signature,
                raw,
            })
            .raw)
    }

    /// Parse a three-segment compact string
    pub fn decode(
        compact: &str,
        key: impl Into<Vec<u8>>,
        policy: &AlgorithmPolicy,
    ) -> Result<Self> {
        let parts: Vec<&str> = compact.split('.').collect();
        let [header, payload, signature] = parts[..] else {
            return Err(Error::MalformedToken { parts: parts.len() });
        };
        Self::from_parts(compact, [header, payload, signature], key.into(), policy)
    }

    pub(crate) fn from_parts(
        compact: &str,
        [header, payload, signature]: [&str; 3],
        key: Vec<u8>,
        policy: &AlgorithmPolicy,
    ) -> Result<Self> {
        let header = HeaderSegment::deserialize(header)?;
        let algorithm: AlgorithmType = header.algorithm()?.parse()?;
        policy.validate(&algorithm)?;
        if algorithm.kind()? != TokenKind::Jws {
            return Err(Error::MalformedToken {
                parts: TokenKind::Jws.segments(),
            });
        }

        let payload = PayloadSegment::deserialize(payload)?;
        let signature = SignatureSegment::from_encoded(signature)?;

        Ok(Self {
            algorithm: jws_algorithm(algorithm)?,
            key,
            claims: payload.claims().clone(),
            compact: Some(JwsCompact {
                header,
                payload,
                signature,
                raw: compact.to_string(),
            }),
            state: TokenState::Decoded,
        })
    }

    /// Verify the signature over the transmitted segments, then check `exp`
    pub fn validate(&mut self) -> Result<()> {
        self.validate_at(Utc::now())
    }

    /// [`validate`](Self::validate) against a fixed clock
    pub fn validate_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        let compact = match (self.state, &self.compact) {
            (TokenState::Decoded | TokenState::Validated, Some(compact)) => compact,
            _ => return Err(Error::InvalidState("validate requires a decoded token")),
        };
        self.state = TokenState::Decoded;

        self.algorithm.verify(
            &self.key,
            &compact.signing_input(),
            compact.signature.encoded(),
        )?;
        self.claims.check_expiry(now)?;

        self.state = TokenState::Validated;
        Ok(())
    }

    pub fn algorithm(&self) -> AlgorithmType {
        self.algorithm.algorithm()
    }

    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Header as encoded or received
    pub fn header(&self) -> Option<&Header> {
        self.compact.as_ref().map(|compact| compact.header.header())
    }

    /// Compact string, once encoded or decoded
    pub fn raw(&self) -> Option<&str> {
        self.compact.as_ref().map(|compact| compact.raw.as_str())
    }

    pub fn state(&self) -> TokenState {
        self.state
    }
}

impl std::fmt::Debug for JwsToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwsToken")
            .field("algorithm", &self.algorithm())
            .field("state", &self.state)
            .field("claims", &self.claims.len())
            .finish_non_exhaustive()
    }
}
