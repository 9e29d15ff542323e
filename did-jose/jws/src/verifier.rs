use did_jose_core::VerificationMethod;

/// A verification backend.  Declares which verification method types it can check for a
/// given JOSE "alg" value, and attempts verification against an ordered candidate set,
/// returning the first candidate that validates both structurally and cryptographically.
#[async_trait::async_trait]
pub trait Verifier: Send + Sync {
    /// Verification method type tags (e.g. "JsonWebKey2020",
    /// "Ed25519VerificationKey2018") this verifier supports for the given algorithm.
    /// Candidates of any other type are never offered to verify.
    fn supported_verification_method_types(&self, alg: &str) -> Vec<String>;
    /// Attempts the candidates in order; the first match wins.  Fails when no candidate
    /// validates.  The signature is the raw base64url signature segment of the token.
    async fn verify(
        &self,
        alg: &str,
        signing_input: &[u8],
        signature: &str,
        candidate_v: &[VerificationMethod],
    ) -> anyhow::Result<VerificationMethod>;
}
