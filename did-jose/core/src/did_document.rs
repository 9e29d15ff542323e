use crate::{VerificationMethod, DID};

/// The subset of a resolved DID document that token verification consumes: the verification
/// methods and the relationship arrays that reference them by id.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DIDDocument {
    pub id: DID,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verification_method: Vec<VerificationMethod>,
    /// Ids of verification methods usable for authentication.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authentication: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertion_method: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_agreement: Vec<String>,
}

impl DIDDocument {
    pub fn new(id: DID) -> Self {
        Self {
            id,
            verification_method: Vec::new(),
            authentication: Vec::new(),
            assertion_method: Vec::new(),
            key_agreement: Vec::new(),
        }
    }
    /// Verification methods whose type tag is among the given set, in document order.
    pub fn verification_methods_of_type<'a>(
        &'a self,
        type_v: &'a [String],
    ) -> impl Iterator<Item = &'a VerificationMethod> {
        self.verification_method
            .iter()
            .filter(move |method| type_v.iter().any(|t| *t == method.r#type))
    }
    /// True iff the given verification method id is in the authentication relationship.
    pub fn is_authentication_method(&self, method_id: &str) -> bool {
        self.authentication.iter().any(|id| id == method_id)
    }
}
