//! Protected header model

use crate::algorithm::{AlgorithmType, ContentEncryption};
use crate::error::{Error, Result};

use miniserde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Media type written to the `typ` header property
pub const TOKEN_TYPE: &str = "JWT";

/// Protected header properties
///
/// Serialized with keys in ascending order, so a freshly built header always
/// produces the same bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    properties: BTreeMap<String, Value>,
}

impl Header {
    /// Header for a signed token: `alg` and `typ`
    pub fn jws(algorithm: AlgorithmType) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert("alg".to_string(), Value::from(algorithm.as_str()));
        properties.insert("typ".to_string(), Value::from(TOKEN_TYPE));
        Self { properties }
    }

    /// Header for an encrypted token: `alg`, `enc` and `typ`
    pub fn jwe(algorithm: AlgorithmType, encryption: ContentEncryption) -> Self {
        let mut header = Self::jws(algorithm);
        header
            .properties
            .insert("enc".to_string(), Value::from(encryption.as_str()));
        header
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// `alg` property, if present and a string
    pub fn algorithm(&self) -> Option<&str> {
        self.properties.get("alg").and_then(Value::as_str)
    }

    /// `enc` property, if present and a string
    pub fn encryption_algorithm(&self) -> Option<&str> {
        self.properties.get("enc").and_then(Value::as_str)
    }

    pub(crate) fn to_json(&self) -> Result<String> {
        let object = self
            .properties
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect::<Map<String, Value>>();

        serde_json::to_string(&Value::Object(object))
            .map_err(|e| Error::InvalidJson(format!("header encoding failed: {e}")))
    }

    pub(crate) fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::InvalidJson(format!("header: {e}")))?;
        let Value::Object(object) = value else {
            return Err(Error::InvalidJson("header: expected a JSON object".to_string()));
        };

        Ok(Self {
            properties: object.into_iter().collect(),
        })
    }
}

/// Typed view over the algorithm fields of a header
///
/// Parsed from the transmitted JSON text, not from [`Header`], so callers
/// can read `alg`/`enc` without knowing the rest of the header shape.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HeaderFields {
    #[serde(rename = "alg")]
    pub algorithm: Option<String>,

    #[serde(rename = "enc")]
    pub encryption: Option<String>,
}

impl HeaderFields {
    pub(crate) fn parse(json: &str) -> Result<Self> {
        miniserde::json::from_str(json)
            .map_err(|_| Error::InvalidJson("header: alg and enc must be strings".to_string()))
    }

    /// `alg`, or `MissingHeaderField` if absent
    pub(crate) fn require_algorithm(&self) -> Result<&str> {
        self.algorithm
            .as_deref()
            .ok_or_else(|| Error::MissingHeaderField("alg".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jws_header_json() {
        let header = Header::jws(AlgorithmType::HS256);
        assert_eq!(header.to_json().unwrap(), r#"{"alg":"HS256","typ":"JWT"}"#);
        assert_eq!(header.algorithm(), Some("HS256"));
        assert_eq!(header.encryption_algorithm(), None);
    }

    #[test]
    fn test_jwe_header_json() {
        let header = Header::jwe(AlgorithmType::RsaOaep, ContentEncryption::A256GCM);
        assert_eq!(
            header.to_json().unwrap(),
            r#"{"alg":"RSA-OAEP","enc":"A256GCM","typ":"JWT"}"#
        );
    }

    #[test]
    fn test_from_json_keeps_unknown_properties() {
        let header = Header::from_json(r#"{"typ":"JWT","kid":"k1","alg":"RS256"}"#).unwrap();
        assert_eq!(header.get("kid"), Some(&Value::from("k1")));
        assert_eq!(header.algorithm(), Some("RS256"));
        assert!(matches!(Header::from_json("[]"), Err(Error::InvalidJson(_))));
    }

    #[test]
    fn test_header_fields() {
        let fields = HeaderFields::parse(r#"{"alg":"RSA-OAEP","enc":"A256GCM","x":[1]}"#).unwrap();
        assert_eq!(fields.require_algorithm().unwrap(), "RSA-OAEP");
        assert_eq!(fields.encryption.as_deref(), Some("A256GCM"));

        let missing = HeaderFields::parse(r#"{"typ":"JWT"}"#).unwrap();
        assert_eq!(
            missing.require_algorithm(),
            Err(Error::MissingHeaderField("alg".to_string()))
        );

        assert!(matches!(
            HeaderFields::parse(r#"{"alg":256}"#),
            Err(Error::InvalidJson(_))
        ));
    }
}
