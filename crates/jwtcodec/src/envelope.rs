//! Compact serialization segments
//!
//! Each segment is an immutable value that carries its parsed form together
//! with the exact JSON text and Base64URL text it was built from or decoded
//! from. Signing input and AAD are always taken from the cached text, never
//! from a re-serialization.

use crate::claims::ClaimSet;
use crate::error::{Error, Result};
use crate::header::{Header, HeaderFields};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_ENCRYPTED_KEY_SIZE, MAX_IV_TAG_SIZE, MAX_SIGNATURE_B64_SIZE,
};
use crate::utils::base64url;

/// Protected header segment
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderSegment {
    header: Header,
    json: String,
    encoded: String,
}

impl HeaderSegment {
    pub fn serialize(header: Header) -> Result<Self> {
        let json = header.to_json()?;
        let encoded = base64url::encode_bytes(&json);
        Ok(Self {
            header,
            json,
            encoded,
        })
    }

    pub fn deserialize(encoded: &str) -> Result<Self> {
        let json = base64url::decode_string(encoded, MAX_DECODED_HEADER_SIZE)?;
        let header = Header::from_json(&json)?;
        Ok(Self {
            header,
            json,
            encoded: encoded.to_string(),
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// JSON text exactly as encoded
    pub fn json(&self) -> &str {
        &self.json
    }

    /// Base64URL text exactly as transmitted
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// `alg` from the cached JSON
    pub fn algorithm(&self) -> Result<String> {
        let fields = HeaderFields::parse(&self.json)?;
        fields.require_algorithm().map(str::to_string)
    }

    /// `enc` from the cached JSON, if present
    pub fn encryption_algorithm(&self) -> Result<Option<String>> {
        Ok(HeaderFields::parse(&self.json)?.encryption)
    }
}

/// JWS payload segment
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadSegment {
    claims: ClaimSet,
    json: String,
    encoded: String,
}

impl PayloadSegment {
    /// Canonically encode `claims`
    pub fn serialize(claims: ClaimSet) -> Result<Self> {
        let bytes = claims.canonical_encode()?;
        let encoded = base64url::encode_bytes(&bytes);
        let json = String::from_utf8(bytes)
            .map_err(|e| Error::InvalidJson(format!("claims: {e}")))?;
        Ok(Self {
            claims,
            json,
            encoded,
        })
    }

    pub fn deserialize(encoded: &str) -> Result<Self> {
        let json = base64url::decode_string(encoded, MAX_DECODED_PAYLOAD_SIZE)?;
        let claims = ClaimSet::from_json(json.as_bytes())?;
        Ok(Self {
            claims,
            json,
            encoded: encoded.to_string(),
        })
    }

    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn encoded(&self) -> &str {
        &self.encoded
    }
}

/// JWS signature segment
///
/// Kept as transmitted text; the algorithm decodes it during verification
/// so that `none` can accept any third segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureSegment {
    encoded: String,
}

impl SignatureSegment {
    pub fn from_bytes(signature: &[u8]) -> Self {
        Self {
            encoded: base64url::encode_bytes(signature),
        }
    }

    pub fn from_encoded(encoded: &str) -> Result<Self> {
        if encoded.len() > MAX_SIGNATURE_B64_SIZE {
            return Err(Error::InvalidBase64(format!(
                "Signature too large: {} bytes (maximum: {} bytes)",
                encoded.len(),
                MAX_SIGNATURE_B64_SIZE
            )));
        }
        Ok(Self {
            encoded: encoded.to_string(),
        })
    }

    pub fn encoded(&self) -> &str {
        &self.encoded
    }
}

/// Decode a signature segment for comparison; any failure is a mismatch
pub(crate) fn decode_signature(encoded: &str) -> Result<Vec<u8>> {
    base64url::decode_bytes(encoded, MAX_DECODED_SIGNATURE_SIZE)
        .map_err(|_| Error::SignatureMismatch)
}

/// The four binary JWE segments following the header
#[derive(Clone, PartialEq, Eq)]
pub struct SealedContent {
    pub encrypted_key: Vec<u8>,
    pub iv: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub tag: Vec<u8>,
}

impl SealedContent {
    /// Base64URL segments in compact order
    pub(crate) fn encode(&self) -> [String; 4] {
        [
            base64url::encode_bytes(&self.encrypted_key),
            base64url::encode_bytes(&self.iv),
            base64url::encode_bytes(&self.ciphertext),
            base64url::encode_bytes(&self.tag),
        ]
    }

    pub(crate) fn decode(encrypted_key: &str, iv: &str, ciphertext: &str, tag: &str) -> Result<Self> {
        Ok(Self {
            encrypted_key: base64url::decode_bytes(encrypted_key, MAX_ENCRYPTED_KEY_SIZE)?,
            iv: base64url::decode_bytes(iv, MAX_IV_TAG_SIZE)?,
            ciphertext: base64url::decode_bytes(ciphertext, MAX_DECODED_PAYLOAD_SIZE)?,
            tag: base64url::decode_bytes(tag, MAX_IV_TAG_SIZE)?,
        })
    }
}

impl std::fmt::Debug for SealedContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealedContent")
            .field("encrypted_key_len", &self.encrypted_key.len())
            .field("iv_len", &self.iv.len())
            .field("ciphertext_len", &self.ciphertext.len())
            .field("tag_len", &self.tag.len())
            .finish()
    }
}
