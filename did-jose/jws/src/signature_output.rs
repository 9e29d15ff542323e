/// Structured signature components as returned by an EC signer before JOSE encoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EcdsaSignature {
    /// Big-endian r component.
    pub r: Vec<u8>,
    /// Big-endian s component.
    pub s: Vec<u8>,
    /// Recovery id; required by the ES256K-R compatibility encoding, ignored elsewhere.
    pub recovery_param_o: Option<u8>,
}

/// What a Signer may produce: structured components (EC backends) or an already
/// base64url-encoded signature string (EdDSA backends, pre-encoding KMS adapters).
/// Algorithm adapters match on the variant explicitly; there is no runtime type
/// inspection anywhere downstream.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SignatureOutput {
    Structured(EcdsaSignature),
    Encoded(String),
}
