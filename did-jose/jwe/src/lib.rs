//! Authenticated encryption envelopes (JWE) for DID-identified parties: ECDH-ES and
//! ECDH-1PU key agreement over X25519, Concat KDF key derivation, XC20PKW key wrapping, and
//! XC20P (XChaCha20-Poly1305) content encryption.

mod concat_kdf;
mod content_encryption;
mod jwe;
mod key_agreement;
mod key_wrap;

pub use crate::{
    jwe::{
        create_jwe, decrypt_jwe, JWEDecryptionKey, JWEOptions, JWEProtectedHeader, JWERecipient,
        JWERecipientHeader, JWERecipientKey, JWESender, JWE,
    },
    key_agreement::KeyAgreementAlg,
};
pub use did_jose_core::{Error, Result};
