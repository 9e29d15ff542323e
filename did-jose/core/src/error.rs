use std::borrow::Cow;

/// Closed error taxonomy for the whole workspace.  Every cryptographic and structural failure
/// is terminal for its call and is returned as one of these kinds; nothing is retried
/// internally.  The distinction between "structurally malformed" and "signature invalid" is
/// deliberate and must be preserved by callers that re-wrap these errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Audience mismatch: {0}")]
    AudienceMismatch(Cow<'static, str>),
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(Cow<'static, str>),
    #[error("Invalid configuration: {0}")]
    Configuration(Cow<'static, str>),
    /// Carries no context: the failure report must not vary with which byte or key caused
    /// the AEAD tag mismatch.
    #[error("Decryption failed")]
    DecryptionFailed,
    #[error("Duplicate algorithm: {0}")]
    DuplicateAlgorithm(Cow<'static, str>),
    #[error("Expired: {0}")]
    Expired(Cow<'static, str>),
    #[error("Invalid algorithm name: {0}")]
    InvalidAlgorithmName(Cow<'static, str>),
    #[error("Invalid DID document: {0}")]
    InvalidDocument(Cow<'static, str>),
    #[error("Invalid expiry: {0}")]
    InvalidExpiry(Cow<'static, str>),
    #[error("Invalid issuer: {0}")]
    InvalidIssuer(Cow<'static, str>),
    #[error("Invalid signature: {0}")]
    InvalidSignature(Cow<'static, str>),
    #[error("Issuer resolution failed: {0}")]
    IssuerResolutionFailed(#[source] anyhow::Error),
    #[error("Key agreement failed: {0}")]
    KeyAgreementFailed(Cow<'static, str>),
    /// Carries no context, as DecryptionFailed.
    #[error("Key wrap failed")]
    KeyWrapFailed,
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(Cow<'static, str>),
    #[error("Malformed token: {0}")]
    MalformedToken(Cow<'static, str>),
    #[error("Missing algorithm: {0}")]
    MissingAlgorithm(Cow<'static, str>),
    #[error("Missing sender key: {0}")]
    MissingSenderKey(Cow<'static, str>),
    #[error("No matching key: {0}")]
    NoMatchingKey(Cow<'static, str>),
    #[error("Not yet valid: {0}")]
    NotYetValid(Cow<'static, str>),
    #[error("Recovery param missing: {0}")]
    RecoveryParamMissing(Cow<'static, str>),
    #[error("Signing failed: {0}")]
    SigningFailed(#[source] anyhow::Error),
    #[error("Unexpected signature shape: {0}")]
    UnexpectedSignatureShape(Cow<'static, str>),
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(Cow<'static, str>),
}
