use crate::DIDDocument;

/// Resolves a DID to its DID document.  Implementations typically perform network or storage
/// I/O, so resolution is async; the token engine awaits it at a well-defined suspension point
/// (holding no lock) and surfaces any failure as Error::IssuerResolutionFailed.  Timeout and
/// retry discipline belong to the implementation, not to the engine.
#[async_trait::async_trait]
pub trait DIDResolver: Send + Sync {
    async fn resolve_did_document(&self, did: &str) -> anyhow::Result<DIDDocument>;
}
