//! Run with
//!
//! ```not_rust
//! RUST_LOG=jwtcodec=debug,bearer=debug cargo run --example bearer
//! ```
//!
//! Issues an HS256 bearer token, reads it back from an `Authorization`
//! header value, then sends an RSA-OAEP encrypted token to a key holder.

use jwtcodec::{
    AlgorithmType, ClaimSet, ContentEncryption, RegisteredClaim, TokenBuilder, bearer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SECRET: &str = "change-me";
const RECIPIENT_PUBLIC: &[u8] = include_bytes!("../tests/fixtures/rsa_public.pem");
const RECIPIENT_PRIVATE: &[u8] = include_bytes!("../tests/fixtures/rsa_private_pkcs8.pem");

fn main() -> jwtcodec::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug,jwtcodec=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Signed bearer token
    let token = bearer::issue_hs256(SECRET, bearer::service_claims("web-template")?)?;
    let header = format!("Bearer {token}");
    info!(%header, "issued");

    let claims = bearer::verify_hs256(SECRET, bearer::extract_bearer(&header)?)?;
    info!(aud = ?claims.get_str("aud"), iat = ?claims.timestamp(RegisteredClaim::IssuedAt)?, "verified");

    if !bearer::is_valid_hs256("wrong-secret", &token) {
        info!("token rejected with the wrong secret");
    }

    // Encrypted token
    let mut secret_claims = ClaimSet::new();
    secret_claims.add("sub", "user-123")?;
    secret_claims.add("account", "4111-1111")?;

    let compact = TokenBuilder::new()
        .jwe(AlgorithmType::RsaOaep, ContentEncryption::A256GCM, RECIPIENT_PUBLIC)?
        .add_claims(secret_claims)?
        .serialize()?
        .into_string();
    info!(segments = compact.split('.').count(), "encrypted");

    let decrypted = TokenBuilder::new()
        .decode(&compact, RECIPIENT_PRIVATE)?
        .validate()?
        .into_claims();
    for (name, value) in decrypted.iter() {
        info!(%name, %value, "decrypted claim");
    }

    Ok(())
}
