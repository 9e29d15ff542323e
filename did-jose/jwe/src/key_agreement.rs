use did_jose_core::{Error, Result};

/// Key agreement algorithm of a JWE.  ECDH-ES derives the content-encryption key directly
/// (single recipient, anonymous sender); the +XC20PKW variants derive a per-recipient
/// key-wrapping key instead, and ECDH-1PU additionally mixes the sender's static key into
/// the derivation, authenticating the sender to each recipient.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyAgreementAlg {
    EcdhEs,
    EcdhEsXc20pkw,
    Ecdh1puXc20pkw,
}

impl KeyAgreementAlg {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAgreementAlg::EcdhEs => "ECDH-ES",
            KeyAgreementAlg::EcdhEsXc20pkw => "ECDH-ES+XC20PKW",
            KeyAgreementAlg::Ecdh1puXc20pkw => "ECDH-1PU+XC20PKW",
        }
    }
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "ECDH-ES" => Ok(KeyAgreementAlg::EcdhEs),
            "ECDH-ES+XC20PKW" => Ok(KeyAgreementAlg::EcdhEsXc20pkw),
            "ECDH-1PU+XC20PKW" => Ok(KeyAgreementAlg::Ecdh1puXc20pkw),
            _ => Err(Error::UnsupportedAlgorithm(s.to_owned().into())),
        }
    }
    /// True for the variants that wrap a randomly generated content-encryption key.
    pub fn uses_key_wrap(&self) -> bool {
        !matches!(self, KeyAgreementAlg::EcdhEs)
    }
}

impl std::fmt::Display for KeyAgreementAlg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// X25519 Diffie-Hellman.  The all-zeros output of a low-order remote point is rejected, so
/// the shared secret always has contribution from both keys.
pub(crate) fn derive_shared_secret(
    local_private: &x25519_dalek::StaticSecret,
    remote_public: &[u8],
) -> Result<[u8; 32]> {
    let remote_public_a: [u8; 32] = remote_public.try_into().map_err(|_| {
        Error::KeyAgreementFailed("X25519 public key must be exactly 32 bytes".into())
    })?;
    let shared_secret =
        local_private.diffie_hellman(&x25519_dalek::PublicKey::from(remote_public_a));
    if !shared_secret.was_contributory() {
        return Err(Error::KeyAgreementFailed(
            "X25519 remote public key is a low-order point".into(),
        ));
    }
    Ok(*shared_secret.as_bytes())
}
