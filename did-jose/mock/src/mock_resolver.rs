use did_jose_core::{DIDDocument, DIDResolver};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory DID resolver: documents are registered up front and looked up by DID string.
#[derive(Default)]
pub struct MockResolver {
    document_m: RwLock<HashMap<String, DIDDocument>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn register(&self, did_document: DIDDocument) {
        self.document_m
            .write()
            .unwrap()
            .insert(did_document.id.to_string(), did_document);
    }
}

#[async_trait::async_trait]
impl DIDResolver for MockResolver {
    async fn resolve_did_document(&self, did: &str) -> anyhow::Result<DIDDocument> {
        self.document_m
            .read()
            .unwrap()
            .get(did)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no DID document registered for {}", did))
    }
}

/// A resolver whose every resolution fails, for exercising resolution error paths.
pub struct FailingResolver;

#[async_trait::async_trait]
impl DIDResolver for FailingResolver {
    async fn resolve_did_document(&self, did: &str) -> anyhow::Result<DIDDocument> {
        anyhow::bail!("resolution of {} failed (as configured)", did)
    }
}
