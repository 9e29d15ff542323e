use crate::SignatureOutput;

/// A signing backend.  May be backed by an in-memory key, an HSM, or a remote KMS; signing
/// is therefore async and the engine awaits it without holding any lock.  The signer owns
/// its key material; the engine keeps no signer state across calls.
#[async_trait::async_trait]
pub trait Signer: Send + Sync {
    async fn sign(&self, signing_input: &[u8]) -> anyhow::Result<SignatureOutput>;
}
