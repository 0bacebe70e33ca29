//! DER helpers for RSA public key encodings
//!
//! aws-lc-rs wants RSA public keys as SubjectPublicKeyInfo for encryption,
//! while PEM files may carry a bare PKCS#1 `RSAPublicKey`. These helpers
//! use the RustCrypto `spki` and `der` crates to move between the two.

use crate::error::{Error, Result};
use der::{
    Decode, Encode, Sequence,
    asn1::{AnyRef, BitString, UintRef},
};
use spki::{
    AlgorithmIdentifierOwned, ObjectIdentifier, SubjectPublicKeyInfoOwned, SubjectPublicKeyInfoRef,
};

const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

fn der_error(operation: &str, details: impl std::fmt::Display) -> Error {
    Error::InvalidKey(format!("{operation}: {details}"))
}

/// RSAPublicKey as defined in RFC 8017:
/// RSAPublicKey ::= SEQUENCE {
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER   -- e
/// }
#[derive(Sequence)]
struct RsaPublicKey<'a> {
    modulus: UintRef<'a>,
    public_exponent: UintRef<'a>,
}

/// Wrap a PKCS#1 `RSAPublicKey` in a SubjectPublicKeyInfo
pub(crate) fn rsa_spki_from_pkcs1(pkcs1: &[u8]) -> Result<Vec<u8>> {
    let key = RsaPublicKey::from_der(pkcs1)
        .map_err(|e| der_error("failed to parse PKCS#1 public key", e))?;
    if key.modulus.as_bytes().is_empty() || key.public_exponent.as_bytes().is_empty() {
        return Err(der_error("rsa key missing n or e", "empty integer"));
    }

    let algorithm = AlgorithmIdentifierOwned {
        oid: RSA_ENCRYPTION_OID,
        parameters: Some(AnyRef::NULL.into()),
    };

    let subject_public_key = BitString::new(0, pkcs1.to_vec())
        .map_err(|e| der_error("failed to create bit string", e))?;

    let spki = SubjectPublicKeyInfoOwned {
        algorithm,
        subject_public_key,
    };

    spki.to_der()
        .map_err(|e| der_error("failed to encode SPKI", e))
}

/// Check that a SubjectPublicKeyInfo carries an RSA key
pub(crate) fn ensure_rsa_spki(spki_der: &[u8]) -> Result<()> {
    let spki = SubjectPublicKeyInfoRef::from_der(spki_der)
        .map_err(|e| der_error("failed to parse SPKI", e))?;

    if spki.algorithm.oid != RSA_ENCRYPTION_OID {
        return Err(der_error(
            "unsupported public key algorithm",
            spki.algorithm.oid,
        ));
    }

    Ok(())
}
