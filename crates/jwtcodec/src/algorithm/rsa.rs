use super::{AlgorithmType, JwsAlgorithm};
use crate::envelope::decode_signature;
use crate::error::{Error, Result};
use crate::keys::PemKey;

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, UnparsedPublicKey};

/// RS256 algorithm (RSASSA-PKCS1-v1_5 with SHA-256)
///
/// Signs with a PKCS#8 or PKCS#1 private key. Verifies with either a
/// private key or an SPKI / PKCS#1 public key.
pub struct RS256;

impl JwsAlgorithm for RS256 {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::RS256
    }

    fn sign(&self, key: &[u8], signing_input: &str) -> Result<Vec<u8>> {
        let key_pair = PemKey::parse(key)?.signing_key_pair(self.algorithm().as_str())?;

        let rng = SystemRandom::new();
        let mut signature = vec![0u8; key_pair.public_modulus_len()];
        key_pair
            .sign(
                &signature::RSA_PKCS1_SHA256,
                &rng,
                signing_input.as_bytes(),
                &mut signature,
            )
            .map_err(|_| Error::SigningFailed)?;

        Ok(signature)
    }

    fn verify(&self, key: &[u8], signing_input: &str, signature: &str) -> Result<()> {
        let public_key_der = PemKey::parse(key)?.verification_der(self.algorithm().as_str())?;
        let signature_bytes = decode_signature(signature)?;

        let public_key =
            UnparsedPublicKey::new(&signature::RSA_PKCS1_2048_8192_SHA256, public_key_der);

        public_key
            .verify(signing_input.as_bytes(), &signature_bytes)
            .map_err(|_| Error::SignatureMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64url;

    const PKCS8: &[u8] = include_bytes!("../../tests/fixtures/rsa_private_pkcs8.pem");
    const PKCS1: &[u8] = include_bytes!("../../tests/fixtures/rsa_private_pkcs1.pem");
    const PUBLIC: &[u8] = include_bytes!("../../tests/fixtures/rsa_public.pem");
    const OTHER: &[u8] = include_bytes!("../../tests/fixtures/other_private_pkcs8.pem");

    const SIGNING_INPUT: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

    #[test]
    fn test_rs256_sign_and_verify() {
        let signature = RS256.sign(PKCS8, SIGNING_INPUT).unwrap();
        assert_eq!(signature.len(), 256);

        let encoded = base64url::encode_bytes(&signature);
        assert!(RS256.verify(PUBLIC, SIGNING_INPUT, &encoded).is_ok());
        assert!(RS256.verify(PKCS8, SIGNING_INPUT, &encoded).is_ok());
        assert!(RS256.verify(PKCS1, SIGNING_INPUT, &encoded).is_ok());
    }

    #[test]
    fn test_rs256_is_deterministic_across_key_encodings() {
        // PKCS#1 v1.5 signatures carry no randomness
        assert_eq!(
            RS256.sign(PKCS8, SIGNING_INPUT).unwrap(),
            RS256.sign(PKCS1, SIGNING_INPUT).unwrap()
        );
    }

    #[test]
    fn test_rs256_wrong_key() {
        let encoded = base64url::encode_bytes(&RS256.sign(OTHER, SIGNING_INPUT).unwrap());
        assert_eq!(
            RS256.verify(PUBLIC, SIGNING_INPUT, &encoded),
            Err(Error::SignatureMismatch)
        );
    }

    #[test]
    fn test_rs256_modified_input() {
        let encoded = base64url::encode_bytes(&RS256.sign(PKCS8, SIGNING_INPUT).unwrap());
        assert_eq!(
            RS256.verify(PUBLIC, "eyJhbGciOiJSUzI1NiJ9.e30", &encoded),
            Err(Error::SignatureMismatch)
        );
    }

    #[test]
    fn test_rs256_key_errors() {
        assert!(matches!(
            RS256.sign(PUBLIC, SIGNING_INPUT),
            Err(Error::KeyTypeMismatch { .. })
        ));
        assert!(matches!(
            RS256.sign(b"TEST", SIGNING_INPUT),
            Err(Error::InvalidKey(_))
        ));
    }
}
