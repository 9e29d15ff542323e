mod algorithm_registry;
mod jws;
mod jwt;
mod jwt_header;
mod jwt_payload;
mod multisignature;
mod signature_output;
mod signer;
mod verifier;

pub use crate::{
    algorithm_registry::{AlgorithmAdapter, AlgorithmRegistry},
    jws::{create_jws, decode_jwt, DecodedJWT},
    jwt::{create_jwt, verify_jwt, JWTOptions, JWTVerifyOptions, VerifiedJWT},
    jwt_header::JWTHeader,
    jwt_payload::{Audience, JWTPayload},
    multisignature::{create_multisignature_jwt, GeneralJWS, JWSSignatureEntry, SignerEntry},
    signature_output::{EcdsaSignature, SignatureOutput},
    signer::Signer,
    verifier::Verifier,
};
pub use did_jose_core::{Error, Result};
