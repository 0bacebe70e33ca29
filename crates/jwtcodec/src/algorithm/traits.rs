use super::{AlgorithmType, ContentEncryption};
use crate::envelope::SealedContent;
use crate::error::Result;

/// Signature algorithm for three-segment tokens
///
/// `key` is the raw key material as supplied by the caller: the shared
/// secret for HMAC, PEM bytes for RSA.
pub trait JwsAlgorithm: Send + Sync {
    /// The algorithm identifier written to `alg`
    fn algorithm(&self) -> AlgorithmType;

    /// Sign `signing_input` (`header.payload`) and return the raw signature
    fn sign(&self, key: &[u8], signing_input: &str) -> Result<Vec<u8>>;

    /// Verify a Base64URL-encoded signature over `signing_input`
    fn verify(&self, key: &[u8], signing_input: &str, signature: &str) -> Result<()>;
}

/// Key-wrap plus content-encryption pair for five-segment tokens
pub trait JweAlgorithm: Send + Sync {
    /// The algorithm identifier written to `alg`
    fn algorithm(&self) -> AlgorithmType;

    /// The content-encryption identifier written to `enc`
    fn encryption(&self) -> ContentEncryption;

    /// Generate a content-encryption key, seal `plaintext` with `aad` and
    /// wrap the key for the recipient
    fn encrypt(&self, key: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<SealedContent>;

    /// Unwrap the content-encryption key and open the sealed content
    ///
    /// Every failure is reported as `DecryptionFailed`.
    fn decrypt(&self, key: &[u8], aad: &[u8], sealed: &SealedContent) -> Result<Vec<u8>>;
}
