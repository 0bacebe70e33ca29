use super::{AlgorithmType, JwsAlgorithm};
use crate::error::Result;

/// Unsecured JWS (`alg: none`)
///
/// Produces an empty signature and accepts any signature segment. This
/// provides no integrity at all; it exists for interoperability and tests.
/// Reject it with [`AlgorithmPolicy::secure_default`](super::AlgorithmPolicy::secure_default)
/// wherever tokens come from untrusted parties.
pub struct Unsecured;

impl JwsAlgorithm for Unsecured {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::None
    }

    fn sign(&self, _key: &[u8], _signing_input: &str) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn verify(&self, _key: &[u8], _signing_input: &str, _signature: &str) -> Result<()> {
        Ok(())
    }
}
