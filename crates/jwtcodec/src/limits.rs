//! Size limit constants for input validation

/// Maximum length for a compact token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

// ============================================================================
// Decoded segment size limits
// ============================================================================

/// Maximum size for decoded header JSON (8KB)
/// Headers are typically small (< 1KB), but we allow reasonable margin
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded payload JSON or JWE ciphertext (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA signatures are 256-512 bytes for common key sizes
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Maximum size for Base64URL-encoded signature string (1.5KB)
pub(crate) const MAX_SIGNATURE_B64_SIZE: usize = 1536;

/// Maximum size for the RSA-OAEP wrapped content-encryption key (1KB)
pub(crate) const MAX_ENCRYPTED_KEY_SIZE: usize = 1024;

/// Maximum size for the JWE initialization vector and authentication tag (64 bytes)
pub(crate) const MAX_IV_TAG_SIZE: usize = 64;

// ============================================================================
// Header field size limits
// ============================================================================

/// Maximum length for `alg` and `enc` header values (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;
