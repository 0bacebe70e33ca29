// Internal modules
mod jwe;
mod jws;
#[allow(clippy::module_inception)]
mod token;

// Public API exports
pub use jwe::JweToken;
pub use jws::JwsToken;
pub use token::Token;

use crate::error::{Error, Result};
use crate::limits::MAX_TOKEN_LENGTH;

/// Lifecycle position of a token
///
/// `Initialized -> Encoded` on the building side, `Decoded -> Validated`
/// on the parsing side. The two paths never cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenState {
    /// Built from claims and a key, not yet encoded
    Initialized,
    /// Compact string produced
    Encoded,
    /// Parsed from a compact string, not yet verified
    Decoded,
    /// Signature or AEAD verified and expiry checked
    Validated,
}

/// Fail with `TokenTooLarge` if `compact` exceeds what decoding accepts
pub(crate) fn check_length(compact: &str) -> Result<()> {
    if compact.len() > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: compact.len(),
            max: MAX_TOKEN_LENGTH,
        });
    }
    Ok(())
}
