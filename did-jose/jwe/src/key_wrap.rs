use chacha20poly1305::aead::{AeadInPlace, KeyInit};
use chacha20poly1305::{Key, Tag, XChaCha20Poly1305, XNonce};
use did_jose_core::{Error, Result};
use rand::RngCore;

/// A content-encryption key wrapped under a KDF-derived key-wrapping key (XC20PKW): the
/// wrap's nonce and authentication tag travel in the per-recipient header, the wrapped key
/// bytes in the recipient's encrypted_key member.
pub(crate) struct WrappedKey {
    pub encrypted_key: Vec<u8>,
    pub iv: [u8; 24],
    pub tag: [u8; 16],
}

pub(crate) fn wrap_key(kek: &[u8], cek: &[u8]) -> Result<WrappedKey> {
    if kek.len() != 32 {
        return Err(Error::KeyWrapFailed);
    }
    let cipher = XChaCha20Poly1305::new(Key::from_slice(kek));
    let mut iv = [0u8; 24];
    rand::rngs::OsRng.fill_bytes(&mut iv);
    let mut encrypted_key = cek.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(XNonce::from_slice(&iv), &[], &mut encrypted_key)
        .map_err(|_| Error::KeyWrapFailed)?;
    Ok(WrappedKey {
        encrypted_key,
        iv,
        tag: tag.into(),
    })
}

/// Unwraps a content-encryption key.  Any mismatch (wrong key-wrapping key, corrupted
/// wrapped bytes, wrong nonce or tag) fails with Error::KeyWrapFailed, deliberately free of
/// detail.
pub(crate) fn unwrap_key(
    kek: &[u8],
    encrypted_key: &[u8],
    iv: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>> {
    if kek.len() != 32 || iv.len() != 24 || tag.len() != 16 {
        return Err(Error::KeyWrapFailed);
    }
    let cipher = XChaCha20Poly1305::new(Key::from_slice(kek));
    let mut cek = encrypted_key.to_vec();
    cipher
        .decrypt_in_place_detached(
            XNonce::from_slice(iv),
            &[],
            &mut cek,
            Tag::from_slice(tag),
        )
        .map_err(|_| Error::KeyWrapFailed)?;
    Ok(cek)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_unwrap_round_trip() {
        let kek = [3u8; 32];
        let cek = [9u8; 32];
        let wrapped = wrap_key(&kek, &cek).expect("pass");
        assert_eq!(wrapped.encrypted_key.len(), 32);
        let unwrapped =
            unwrap_key(&kek, &wrapped.encrypted_key, &wrapped.iv, &wrapped.tag).expect("pass");
        assert_eq!(unwrapped, cek);
    }

    #[test]
    fn test_unwrap_with_wrong_kek_fails() {
        let wrapped = wrap_key(&[3u8; 32], &[9u8; 32]).expect("pass");
        assert!(matches!(
            unwrap_key(&[4u8; 32], &wrapped.encrypted_key, &wrapped.iv, &wrapped.tag),
            Err(Error::KeyWrapFailed)
        ));
    }

    #[test]
    fn test_unwrap_tampered_key_fails() {
        let kek = [3u8; 32];
        let mut wrapped = wrap_key(&kek, &[9u8; 32]).expect("pass");
        wrapped.encrypted_key[0] ^= 0x01;
        assert!(matches!(
            unwrap_key(&kek, &wrapped.encrypted_key, &wrapped.iv, &wrapped.tag),
            Err(Error::KeyWrapFailed)
        ));
    }
}
