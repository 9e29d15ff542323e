use chacha20poly1305::aead::{AeadInPlace, KeyInit};
use chacha20poly1305::{Key, Tag, XChaCha20Poly1305, XNonce};
use did_jose_core::{Error, Result};
use rand::RngCore;

pub(crate) const CONTENT_ENCRYPTION_ALG: &str = "XC20P";
pub(crate) const CONTENT_KEY_LEN: usize = 32;

pub(crate) struct EncryptedContent {
    pub ciphertext: Vec<u8>,
    pub iv: [u8; 24],
    pub tag: [u8; 16],
}

/// XC20P (XChaCha20-Poly1305) content encryption with a fresh 24-byte nonce.  The
/// associated data binds the protected header (and any caller-supplied aad) into the tag.
pub(crate) fn encrypt_content(cek: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<EncryptedContent> {
    if cek.len() != CONTENT_KEY_LEN {
        return Err(Error::Configuration(
            "XC20P content-encryption key must be 32 bytes".into(),
        ));
    }
    let cipher = XChaCha20Poly1305::new(Key::from_slice(cek));
    let mut iv = [0u8; 24];
    rand::rngs::OsRng.fill_bytes(&mut iv);
    let mut ciphertext = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(XNonce::from_slice(&iv), aad, &mut ciphertext)
        .map_err(|_| Error::MalformedEnvelope("plaintext exceeds the XC20P size limit".into()))?;
    Ok(EncryptedContent {
        ciphertext,
        iv,
        tag: tag.into(),
    })
}

/// The tag check is atomic: on any mismatch the caller gets Error::DecryptionFailed and no
/// plaintext bytes.
pub(crate) fn decrypt_content(
    cek: &[u8],
    iv: &[u8],
    tag: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    if cek.len() != CONTENT_KEY_LEN || iv.len() != 24 || tag.len() != 16 {
        return Err(Error::DecryptionFailed);
    }
    let cipher = XChaCha20Poly1305::new(Key::from_slice(cek));
    let mut plaintext = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            XNonce::from_slice(iv),
            aad,
            &mut plaintext,
            Tag::from_slice(tag),
        )
        .map_err(|_| Error::DecryptionFailed)?;
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let cek = [5u8; 32];
        let encrypted = encrypt_content(&cek, b"aad", b"hello hippo").expect("pass");
        assert_eq!(encrypted.ciphertext.len(), b"hello hippo".len());
        let plaintext = decrypt_content(
            &cek,
            &encrypted.iv,
            &encrypted.tag,
            b"aad",
            &encrypted.ciphertext,
        )
        .expect("pass");
        assert_eq!(plaintext, b"hello hippo");
    }

    #[test]
    fn test_decrypt_with_different_aad_fails() {
        let cek = [5u8; 32];
        let encrypted = encrypt_content(&cek, b"aad", b"hello hippo").expect("pass");
        assert!(matches!(
            decrypt_content(
                &cek,
                &encrypted.iv,
                &encrypted.tag,
                b"other",
                &encrypted.ciphertext,
            ),
            Err(Error::DecryptionFailed)
        ));
    }

    #[test]
    fn test_decrypt_tampered_ciphertext_fails() {
        let cek = [5u8; 32];
        let mut encrypted = encrypt_content(&cek, b"", b"hello hippo").expect("pass");
        encrypted.ciphertext[0] ^= 0x01;
        assert!(matches!(
            decrypt_content(
                &cek,
                &encrypted.iv,
                &encrypted.tag,
                b"",
                &encrypted.ciphertext,
            ),
            Err(Error::DecryptionFailed)
        ));
    }
}
