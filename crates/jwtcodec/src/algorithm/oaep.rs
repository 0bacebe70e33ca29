use super::{AlgorithmType, ContentEncryption, JweAlgorithm};
use crate::envelope::SealedContent;
use crate::error::{Error, Result};
use crate::keys::PemKey;

use aws_lc_rs::aead::{AES_256_GCM, Aad, LessSafeKey, NONCE_LEN, Nonce, UnboundKey};
use aws_lc_rs::rand::{SecureRandom, SystemRandom};
use aws_lc_rs::rsa::OAEP_SHA256_MGF1SHA256;

/// Content-encryption key length for A256GCM
const CEK_LEN: usize = 32;

/// RSA-OAEP key wrap with A256GCM content encryption
///
/// A fresh 256-bit key and 96-bit IV are drawn per token. The protected
/// header's Base64URL text is the AEAD additional data, and the GCM tag is
/// carried as its own compact segment.
pub struct RsaOaepA256Gcm;

impl JweAlgorithm for RsaOaepA256Gcm {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::RsaOaep
    }

    fn encryption(&self) -> ContentEncryption {
        ContentEncryption::A256GCM
    }

    fn encrypt(&self, key: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<SealedContent> {
        let wrapping_key = PemKey::parse(key)?.oaep_public_key(self.algorithm().as_str())?;

        let rng = SystemRandom::new();
        let mut cek = [0u8; CEK_LEN];
        rng.fill(&mut cek).map_err(|_| Error::RandomUnavailable)?;
        let mut iv = [0u8; NONCE_LEN];
        rng.fill(&mut iv).map_err(|_| Error::RandomUnavailable)?;

        let sealing_key = UnboundKey::new(&AES_256_GCM, &cek)
            .map(LessSafeKey::new)
            .map_err(|_| Error::EncryptionFailed)?;

        let mut ciphertext = plaintext.to_vec();
        let tag = sealing_key
            .seal_in_place_separate_tag(
                Nonce::assume_unique_for_key(iv),
                Aad::from(aad),
                &mut ciphertext,
            )
            .map_err(|_| Error::EncryptionFailed)?;

        let mut encrypted_key = vec![0u8; wrapping_key.ciphertext_size()];
        let wrapped_len = wrapping_key
            .encrypt(&OAEP_SHA256_MGF1SHA256, &cek, &mut encrypted_key, None)
            .map_err(|_| Error::EncryptionFailed)?
            .len();
        encrypted_key.truncate(wrapped_len);

        Ok(SealedContent {
            encrypted_key,
            iv: iv.to_vec(),
            ciphertext,
            tag: tag.as_ref().to_vec(),
        })
    }

    fn decrypt(&self, key: &[u8], aad: &[u8], sealed: &SealedContent) -> Result<Vec<u8>> {
        let unwrapping_key = PemKey::parse(key)?.oaep_private_key(self.algorithm().as_str())?;

        let mut cek = vec![0u8; unwrapping_key.min_output_size()];
        let cek_len = unwrapping_key
            .decrypt(&OAEP_SHA256_MGF1SHA256, &sealed.encrypted_key, &mut cek, None)
            .map_err(|_| Error::DecryptionFailed)?
            .len();
        cek.truncate(cek_len);

        if cek.len() != CEK_LEN || sealed.tag.len() != AES_256_GCM.tag_len() {
            return Err(Error::DecryptionFailed);
        }

        let nonce =
            Nonce::try_assume_unique_for_key(&sealed.iv).map_err(|_| Error::DecryptionFailed)?;
        let opening_key = UnboundKey::new(&AES_256_GCM, &cek)
            .map(LessSafeKey::new)
            .map_err(|_| Error::DecryptionFailed)?;

        // GCM opens ciphertext || tag
        let mut in_out = Vec::with_capacity(sealed.ciphertext.len() + sealed.tag.len());
        in_out.extend_from_slice(&sealed.ciphertext);
        in_out.extend_from_slice(&sealed.tag);

        let plaintext_len = opening_key
            .open_in_place(nonce, Aad::from(aad), &mut in_out)
            .map_err(|_| Error::DecryptionFailed)?
            .len();
        in_out.truncate(plaintext_len);

        Ok(in_out)
    }
}
