use did_jose_core::{encoding, PublicKeyJWK};
use did_jose_jws::{EcdsaSignature, SignatureOutput, Signer};

/// In-process Ed25519 signing key.  Returns the signature pre-encoded, as EdDSA signers
/// must.
pub struct Ed25519Signer {
    signing_key: ed25519_dalek::SigningKey,
}

impl Ed25519Signer {
    pub fn generate() -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng),
        }
    }
    pub fn public_key_jwk(&self) -> PublicKeyJWK {
        PublicKeyJWK::okp("Ed25519", self.signing_key.verifying_key().as_bytes())
    }
}

#[async_trait::async_trait]
impl Signer for Ed25519Signer {
    async fn sign(&self, signing_input: &[u8]) -> anyhow::Result<SignatureOutput> {
        let signature = ed25519_dalek::Signer::sign(&self.signing_key, signing_input);
        Ok(SignatureOutput::Encoded(encoding::encode_bytes(
            &signature.to_bytes(),
        )))
    }
}

/// In-process ES256 (P-256 ECDSA) signing key.  Returns the structured r/s components.
pub struct ES256Signer {
    signing_key: p256::ecdsa::SigningKey,
}

impl ES256Signer {
    pub fn generate() -> Self {
        Self {
            signing_key: p256::ecdsa::SigningKey::random(&mut rand::rngs::OsRng),
        }
    }
    pub fn public_key_jwk(&self) -> PublicKeyJWK {
        let point = self
            .signing_key
            .verifying_key()
            .to_encoded_point(false);
        PublicKeyJWK::ec("P-256", point.x().unwrap(), point.y().unwrap())
    }
}

#[async_trait::async_trait]
impl Signer for ES256Signer {
    async fn sign(&self, signing_input: &[u8]) -> anyhow::Result<SignatureOutput> {
        let signature: p256::ecdsa::Signature =
            p256::ecdsa::signature::Signer::sign(&self.signing_key, signing_input);
        let byte_v = signature.to_bytes();
        Ok(SignatureOutput::Structured(EcdsaSignature {
            r: byte_v[..32].to_vec(),
            s: byte_v[32..].to_vec(),
            recovery_param_o: None,
        }))
    }
}

/// In-process ES256K (secp256k1 ECDSA) signing key.  Always signs recoverably, so the same
/// signer serves both "ES256K" and "ES256K-R"; the non-recoverable encoding simply drops
/// the recovery param.
pub struct ES256KSigner {
    signing_key: k256::ecdsa::SigningKey,
}

impl ES256KSigner {
    pub fn generate() -> Self {
        Self {
            signing_key: k256::ecdsa::SigningKey::random(&mut rand::rngs::OsRng),
        }
    }
    pub fn public_key_jwk(&self) -> PublicKeyJWK {
        let point = self
            .signing_key
            .verifying_key()
            .to_encoded_point(false);
        PublicKeyJWK::ec("secp256k1", point.x().unwrap(), point.y().unwrap())
    }
}

#[async_trait::async_trait]
impl Signer for ES256KSigner {
    async fn sign(&self, signing_input: &[u8]) -> anyhow::Result<SignatureOutput> {
        let (signature, recovery_id) = self.signing_key.sign_recoverable(signing_input)?;
        let byte_v = signature.to_bytes();
        Ok(SignatureOutput::Structured(EcdsaSignature {
            r: byte_v[..32].to_vec(),
            s: byte_v[32..].to_vec(),
            recovery_param_o: Some(recovery_id.to_byte()),
        }))
    }
}
