use crate::{PublicKeyJWK, Result, DID};

/// One verification method of a resolved DID document.  The engine only consumes its key
/// bytes and its type tag; lifecycle (rotation, revocation) is the resolver's concern.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// Method id, typically "<did>#<fragment>".
    pub id: String,
    /// Verification method type tag, e.g. "JsonWebKey2020" or
    /// "Ed25519VerificationKey2018".  Verifiers filter candidates on this.
    pub r#type: String,
    pub controller: DID,
    pub public_key_jwk: PublicKeyJWK,
}

impl VerificationMethod {
    pub fn new(
        controller: DID,
        key_id_fragment: &str,
        r#type: impl Into<String>,
        public_key_jwk: PublicKeyJWK,
    ) -> Self {
        Self {
            id: format!("{}#{}", controller, key_id_fragment),
            r#type: r#type.into(),
            controller,
            public_key_jwk,
        }
    }
    /// Raw public key bytes; see PublicKeyJWK::public_key_bytes.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>> {
        self.public_key_jwk.public_key_bytes()
    }
}
