use did_jose_core::{DIDDocument, PublicKeyJWK, VerificationMethod, DID};

/// A minimal DID document holding one verification method ("<did>#key-1") that is also
/// listed for authentication and assertion.
pub fn single_key_document(did: DID, r#type: &str, public_key_jwk: PublicKeyJWK) -> DIDDocument {
    let verification_method =
        VerificationMethod::new(did.clone(), "key-1", r#type, public_key_jwk);
    let method_id = verification_method.id.clone();
    let mut did_document = DIDDocument::new(did);
    did_document.verification_method.push(verification_method);
    did_document.authentication.push(method_id.clone());
    did_document.assertion_method.push(method_id);
    did_document
}
