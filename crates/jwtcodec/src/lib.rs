//! A compact JOSE token codec.
//!
//! Signed tokens (JWS, three segments) with `HS256`, `RS256` or `none`, and
//! encrypted tokens (JWE, five segments) with `RSA-OAEP` key wrapping and
//! `A256GCM` content encryption.
//!
//! ```
//! use jwtcodec::{AlgorithmType, ClaimSet, TokenBuilder};
//!
//! let mut claims = ClaimSet::new();
//! claims.add("aud", "developers")?;
//!
//! let compact = TokenBuilder::new()
//!     .jws(AlgorithmType::HS256, "TEST")?
//!     .add_claims(claims)?
//!     .serialize()?
//!     .into_string();
//!
//! let validated = TokenBuilder::new().decode(&compact, "TEST")?.validate()?;
//! assert_eq!(validated.claims().get_str("aud"), Some("developers"));
//! # Ok::<(), jwtcodec::Error>(())
//! ```
//!
//! Timestamp claims (`exp`, `nbf`, `iat`) are RFC3339 strings, not numeric
//! dates. `exp` is the only claim checked during validation.

mod error;

// Internal modules
pub(crate) mod algorithm;
pub(crate) mod builder;
pub(crate) mod claims;
pub(crate) mod envelope;
pub(crate) mod header;
pub(crate) mod keys;
pub(crate) mod token;
pub(crate) mod utils;

pub mod bearer;

// Public Interface
pub use algorithm::{
    AlgorithmPolicy, AlgorithmSuite, AlgorithmType, ContentEncryption, HS256, JweAlgorithm,
    JwsAlgorithm, RS256, RsaOaepA256Gcm, TokenKind, Unsecured,
};
pub use builder::{
    Decoded, Serialized, TokenBuilder, Unconfigured, Validated, WithClaims, WithKey,
};
pub use claims::{ClaimSet, RegisteredClaim};
pub use envelope::{HeaderSegment, PayloadSegment, SealedContent, SignatureSegment};
pub use error::{Error, Result};
pub use header::{Header, TOKEN_TYPE};
pub use token::{JweToken, JwsToken, Token, TokenState};

pub(crate) mod limits;
