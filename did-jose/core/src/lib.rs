mod did;
mod did_document;
mod did_resolver;
pub mod encoding;
mod error;
mod public_key_jwk;
mod verification_method;

pub use crate::{
    did::DID, did_document::DIDDocument, did_resolver::DIDResolver, error::Error,
    public_key_jwk::PublicKeyJWK, verification_method::VerificationMethod,
};

pub type Result<T> = std::result::Result<T, Error>;
