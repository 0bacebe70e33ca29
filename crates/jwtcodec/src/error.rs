//! Errors for jwtcodec

use thiserror::Error;

/// Token codec errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Malformed token: expected 3 (JWS) or 5 (JWE) segments, found {parts}")]
    MalformedToken { parts: usize },

    #[error("Base64URL decoding failed: {0}")]
    InvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    InvalidJson(String),

    #[error("Missing required header field: {0}")]
    MissingHeaderField(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported")]
    UnsupportedAlgorithm(String),

    #[error("Algorithm '{found}' not allowed. Allowed: {allowed:?}")]
    AlgorithmNotAllowed { found: String, allowed: Vec<String> },

    // ============================================================================
    // Key Errors
    // ============================================================================
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Key type mismatch for {algorithm}: expected {expected}, found {found}")]
    KeyTypeMismatch {
        algorithm: String,
        expected: String,
        found: String,
    },

    // ============================================================================
    // Cryptographic Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureMismatch,

    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Signing failed")]
    SigningFailed,

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Secure random source unavailable")]
    RandomUnavailable,

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Claim '{0}' already present")]
    DuplicateClaim(String),

    #[error("Claim '{0}' not found")]
    ClaimNotFound(String),

    #[error("Invalid claim '{claim}': {reason}")]
    InvalidClaim { claim: String, reason: String },

    #[error("Token expired at {expired_at}")]
    TokenExpired { expired_at: String },

    // ============================================================================
    // Lifecycle Errors
    // ============================================================================
    #[error("Invalid token state: {0}")]
    InvalidState(&'static str),

    #[error("Authorization header is not a bearer token")]
    MalformedAuthorization,
}

/// Result type alias for jwtcodec
pub type Result<T> = std::result::Result<T, Error>;
