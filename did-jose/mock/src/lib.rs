//! Software implementations of the engine's collaborator traits, for use in tests and
//! examples: in-memory DID resolution, in-process signing keys, and a verifier covering the
//! built-in signature algorithms.  Nothing here is hardened for production key handling.

mod doc;
mod mock_resolver;
mod software_signer;
mod software_verifier;

pub use crate::{
    doc::single_key_document,
    mock_resolver::{FailingResolver, MockResolver},
    software_signer::{ES256KSigner, ES256Signer, Ed25519Signer},
    software_verifier::SoftwareVerifier,
};
