//! Base64URL encoding/decoding per RFC 4648 (no padding)

use crate::error::{Error, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Encode bytes as unpadded Base64URL
pub(crate) fn encode_bytes(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode Base64URL string to bytes with maximum size limit
pub(crate) fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>> {
    // Reject before allocating: 4 encoded chars carry at most 3 bytes
    if input.len() / 4 * 3 > max_size {
        return Err(Error::InvalidBase64(format!(
            "Encoded size exceeds limit: {} chars (max decoded: {})",
            input.len(),
            max_size
        )));
    }

    let result = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::InvalidBase64(format!("Base64URL decode failed: {e}")))?;

    if result.len() > max_size {
        return Err(Error::InvalidBase64(format!(
            "Decoded size exceeds limit: {} bytes (max: {})",
            result.len(),
            max_size
        )));
    }

    Ok(result)
}

/// Decode Base64URL string to UTF-8 string with size limit
pub(crate) fn decode_string(input: &str, max_size: usize) -> Result<String> {
    decode_bytes(input, max_size).and_then(|bytes| {
        String::from_utf8(bytes).map_err(|e| Error::InvalidBase64(format!("Invalid UTF-8: {e}")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_no_padding() {
        assert_eq!(encode_bytes(b"Hello"), "SGVsbG8");
        assert_eq!(encode_bytes([0xfb, 0xff]), "-_8");
    }

    #[test]
    fn test_decode_invalid() {
        assert!(decode_bytes("!!!", 1000).is_err());
        // Padded input is rejected
        assert!(decode_bytes("SGVsbG8=", 1000).is_err());
    }

    #[test]
    fn test_decode_with_limit() {
        assert_eq!(decode_bytes("SGVsbG8", 10).unwrap(), b"Hello");
        assert!(decode_bytes("SGVsbG8", 3).is_err());
        assert!(matches!(
            decode_bytes(&"A".repeat(400), 16),
            Err(Error::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_bytes("", 10).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_string() {
        assert_eq!(decode_string("SGVsbG8", 10).unwrap(), "Hello");
        assert!(decode_string("_w", 10).is_err());
    }
}
