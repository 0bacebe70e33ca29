use super::{AlgorithmType, JwsAlgorithm};
use crate::envelope::decode_signature;
use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// HS256 algorithm (HMAC with SHA-256)
pub struct HS256;

impl JwsAlgorithm for HS256 {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::HS256
    }

    fn sign(&self, key: &[u8], signing_input: &str) -> Result<Vec<u8>> {
        compute_hs256(key, signing_input)
    }

    fn verify(&self, key: &[u8], signing_input: &str, signature: &str) -> Result<()> {
        let provided_signature = decode_signature(signature)?;
        let expected_signature = compute_hs256(key, signing_input)?;

        if provided_signature.len() != expected_signature.len() {
            return Err(Error::SignatureMismatch);
        }

        if constant_time_eq(&provided_signature, &expected_signature) {
            Ok(())
        } else {
            Err(Error::SignatureMismatch)
        }
    }
}

fn compute_hs256(secret: &[u8], signing_input: &str) -> Result<Vec<u8>> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret)
        .map_err(|e| Error::InvalidKey(format!("HMAC key rejected: {e}")))?;
    mac.update(signing_input.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64url;

    const SIGNING_INPUT: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJhdWQiOiJkZXZlbG9wZXJzIn0";

    #[test]
    fn test_hs256_known_signature() {
        let signature = HS256.sign(b"TEST", SIGNING_INPUT).unwrap();
        assert_eq!(
            base64url::encode_bytes(&signature),
            "4kNVyvKLfe6fuioUgM3rbWZ2PRQXRwYcC0c6cCQclGo"
        );
    }

    #[test]
    fn test_hs256_valid_signature() {
        let result = HS256.verify(
            b"TEST",
            SIGNING_INPUT,
            "4kNVyvKLfe6fuioUgM3rbWZ2PRQXRwYcC0c6cCQclGo",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_hs256_wrong_secret() {
        let result = HS256.verify(
            b"OTHER",
            SIGNING_INPUT,
            "4kNVyvKLfe6fuioUgM3rbWZ2PRQXRwYcC0c6cCQclGo",
        );
        assert_eq!(result, Err(Error::SignatureMismatch));
    }

    #[test]
    fn test_hs256_truncated_and_garbage_signatures() {
        let truncated = base64url::encode_bytes(&HS256.sign(b"TEST", SIGNING_INPUT).unwrap()[..31]);
        assert_eq!(
            HS256.verify(b"TEST", SIGNING_INPUT, &truncated),
            Err(Error::SignatureMismatch)
        );
        assert_eq!(
            HS256.verify(b"TEST", SIGNING_INPUT, "not base64!"),
            Err(Error::SignatureMismatch)
        );
        assert_eq!(
            HS256.verify(b"TEST", SIGNING_INPUT, ""),
            Err(Error::SignatureMismatch)
        );
    }
}
