//! Algorithm registry
//!
//! Maps algorithm identifiers to their sign/verify (JWS) or wrap/seal (JWE)
//! implementations through two static tables. Adding an algorithm is a new
//! enum variant plus one table entry.

mod hmac;
mod none;
mod oaep;
mod rsa;
mod traits;

pub use hmac::HS256;
pub use none::Unsecured;
pub use oaep::RsaOaepA256Gcm;
pub use rsa::RS256;
pub use traits::{JweAlgorithm, JwsAlgorithm};

use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;

/// Primary (`alg`) algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmType {
    /// HMAC with SHA-256
    HS256,
    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,
    /// Unsecured JWS with an empty signature
    None,
    /// RSAES-OAEP key wrap (SHA-256, MGF1 with SHA-256)
    RsaOaep,
}

impl std::str::FromStr for AlgorithmType {
    type Err = Error;

    /// Parse an `alg` header value
    fn from_str(s: &str) -> Result<Self> {
        if s.len() > MAX_ALG_LENGTH {
            return Err(Error::UnsupportedAlgorithm(format!(
                "Algorithm string too long: {} bytes (maximum: {} bytes)",
                s.len(),
                MAX_ALG_LENGTH
            )));
        }

        match s {
            "HS256" => Ok(AlgorithmType::HS256),
            "RS256" => Ok(AlgorithmType::RS256),
            "none" => Ok(AlgorithmType::None),
            "RSA-OAEP" => Ok(AlgorithmType::RsaOaep),
            _ => Err(Error::UnsupportedAlgorithm(s.into())),
        }
    }
}

impl AlgorithmType {
    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::HS256 => "HS256",
            AlgorithmType::RS256 => "RS256",
            AlgorithmType::None => "none",
            AlgorithmType::RsaOaep => "RSA-OAEP",
        }
    }

    /// Token kind this algorithm produces, by registry membership
    pub fn kind(&self) -> Result<TokenKind> {
        if JWS_ALGORITHMS.iter().any(|alg| alg.algorithm() == *self) {
            Ok(TokenKind::Jws)
        } else if JWE_ALGORITHMS.iter().any(|alg| alg.algorithm() == *self) {
            Ok(TokenKind::Jwe)
        } else {
            Err(Error::UnsupportedAlgorithm(self.to_string()))
        }
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Content-encryption (`enc`) algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentEncryption {
    /// AES-256 in Galois/Counter Mode
    A256GCM,
}

impl std::str::FromStr for ContentEncryption {
    type Err = Error;

    /// Parse an `enc` header value
    fn from_str(s: &str) -> Result<Self> {
        if s.len() > MAX_ALG_LENGTH {
            return Err(Error::UnsupportedAlgorithm(format!(
                "Encryption string too long: {} bytes (maximum: {} bytes)",
                s.len(),
                MAX_ALG_LENGTH
            )));
        }

        match s {
            "A256GCM" => Ok(ContentEncryption::A256GCM),
            _ => Err(Error::UnsupportedAlgorithm(s.into())),
        }
    }
}

impl ContentEncryption {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ContentEncryption::A256GCM => "A256GCM",
        }
    }
}

impl std::fmt::Display for ContentEncryption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Signed or encrypted compact token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Three segments: header.payload.signature
    Jws,
    /// Five segments: header.encryptedKey.iv.ciphertext.tag
    Jwe,
}

impl TokenKind {
    /// Number of compact segments for this kind
    pub const fn segments(&self) -> usize {
        match self {
            TokenKind::Jws => 3,
            TokenKind::Jwe => 5,
        }
    }
}

/// Primary algorithm plus optional content-encryption algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlgorithmSuite {
    algorithm: AlgorithmType,
    encryption: Option<ContentEncryption>,
}

impl AlgorithmSuite {
    pub const fn new(algorithm: AlgorithmType, encryption: Option<ContentEncryption>) -> Self {
        Self {
            algorithm,
            encryption,
        }
    }

    /// Suite for a signed token
    pub const fn jws(algorithm: AlgorithmType) -> Self {
        Self::new(algorithm, None)
    }

    /// Suite for an encrypted token
    pub const fn jwe(algorithm: AlgorithmType, encryption: ContentEncryption) -> Self {
        Self::new(algorithm, Some(encryption))
    }

    /// Parse `alg` and optional `enc` identifiers
    pub fn parse(algorithm: &str, encryption: Option<&str>) -> Result<Self> {
        Ok(Self::new(
            algorithm.parse::<AlgorithmType>()?,
            encryption.map(str::parse::<ContentEncryption>).transpose()?,
        ))
    }

    pub const fn algorithm(&self) -> AlgorithmType {
        self.algorithm
    }

    pub const fn encryption(&self) -> Option<ContentEncryption> {
        self.encryption
    }

    /// Token kind, classified by the primary algorithm
    pub fn kind(&self) -> Result<TokenKind> {
        self.algorithm.kind()
    }
}

impl std::fmt::Display for AlgorithmSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.encryption {
            Some(encryption) => write!(f, "{}+{}", self.algorithm, encryption),
            None => write!(f, "{}", self.algorithm),
        }
    }
}

static JWS_ALGORITHMS: [&dyn JwsAlgorithm; 3] = [&HS256, &RS256, &Unsecured];

static JWE_ALGORITHMS: [&dyn JweAlgorithm; 1] = [&RsaOaepA256Gcm];

/// Look up the signing implementation for `algorithm`
pub(crate) fn jws_algorithm(algorithm: AlgorithmType) -> Result<&'static dyn JwsAlgorithm> {
    JWS_ALGORITHMS
        .iter()
        .copied()
        .find(|alg| alg.algorithm() == algorithm)
        .ok_or_else(|| Error::UnsupportedAlgorithm(format!("{algorithm} is not a JWS algorithm")))
}

/// Look up the key-wrap and content-encryption implementation for `suite`
pub(crate) fn jwe_algorithm(suite: &AlgorithmSuite) -> Result<&'static dyn JweAlgorithm> {
    let Some(encryption) = suite.encryption() else {
        return Err(Error::UnsupportedAlgorithm(format!(
            "{} requires a content-encryption algorithm",
            suite.algorithm()
        )));
    };

    JWE_ALGORITHMS
        .iter()
        .copied()
        .find(|alg| alg.algorithm() == suite.algorithm() && alg.encryption() == encryption)
        .ok_or_else(|| Error::UnsupportedAlgorithm(format!("{suite} is not a JWE algorithm pair")))
}

/// Policy for allowed algorithms
#[derive(Debug, Clone)]
pub struct AlgorithmPolicy {
    allowed: Vec<AlgorithmType>,
}

impl AlgorithmPolicy {
    /// Policy that allows every registered algorithm, including `none`
    pub fn allow_all() -> Self {
        Self::allow_only(vec![
            AlgorithmType::HS256,
            AlgorithmType::RS256,
            AlgorithmType::None,
            AlgorithmType::RsaOaep,
        ])
    }

    /// Policy that allows every algorithm except `none`
    pub fn secure_default() -> Self {
        Self::allow_only(vec![
            AlgorithmType::HS256,
            AlgorithmType::RS256,
            AlgorithmType::RsaOaep,
        ])
    }

    /// Policy that allows only HS256
    pub fn hs256_only() -> Self {
        Self::allow_only(vec![AlgorithmType::HS256])
    }

    /// Policy that allows only RS256
    pub fn rs256_only() -> Self {
        Self::allow_only(vec![AlgorithmType::RS256])
    }

    /// Policy that allows only RSA-OAEP
    pub fn rsa_oaep_only() -> Self {
        Self::allow_only(vec![AlgorithmType::RsaOaep])
    }

    /// Create a policy that allows only specific algorithms
    pub fn allow_only(algorithms: Vec<AlgorithmType>) -> Self {
        Self {
            allowed: algorithms,
        }
    }

    /// Validate algorithm against policy
    pub(crate) fn validate(&self, algorithm: &AlgorithmType) -> Result<()> {
        if self.is_allowed(algorithm) {
            Ok(())
        } else {
            Err(Error::AlgorithmNotAllowed {
                found: algorithm.to_string(),
                allowed: self.allowed.iter().map(ToString::to_string).collect(),
            })
        }
    }

    /// Check if an algorithm is allowed
    pub fn is_allowed(&self, algorithm: &AlgorithmType) -> bool {
        self.allowed.contains(algorithm)
    }
}

impl Default for AlgorithmPolicy {
    fn default() -> Self {
        Self::allow_all()
    }
}
