use crate::{AlgorithmRegistry, JWTHeader, JWTPayload, Signer};
use did_jose_core::{encoding, Error, Result};

/// A decoded (not yet verified) JWT: parsed header and payload plus the raw segments needed
/// to verify it.
#[derive(Clone, Debug)]
pub struct DecodedJWT {
    pub header: JWTHeader,
    pub payload: JWTPayload,
    /// Raw base64url signature segment.
    pub signature: String,
    /// The signing input, "<base64url(header)>.<base64url(payload)>".  Recomputed per
    /// decode, never persisted.
    pub signing_input: String,
}

/// Signs the header and payload into a JWS Compact Serialization,
/// "<base64url(header)>.<base64url(payload)>.<signature>".  The header's "alg" selects the
/// registry adapter that normalizes the signer's output to the JOSE signature encoding;
/// signer failures propagate verbatim inside Error::SigningFailed.
pub async fn create_jws<P: serde::Serialize + Sync>(
    header: &JWTHeader,
    payload: &P,
    signer: &dyn Signer,
    registry: &AlgorithmRegistry,
) -> Result<String> {
    if header.alg.is_empty() {
        return Err(Error::MissingAlgorithm(
            "JWS header \"alg\" must be set".into(),
        ));
    }
    let adapter = registry.resolve(&header.alg)?;
    let signing_input = signing_input(header, payload)?;
    tracing::debug!(alg = header.alg.as_str(), "creating JWS");
    let output = signer
        .sign(signing_input.as_bytes())
        .await
        .map_err(Error::SigningFailed)?;
    let signature = adapter(output)?;
    Ok(format!("{}.{}", signing_input, signature))
}

pub(crate) fn signing_input<P: serde::Serialize>(header: &JWTHeader, payload: &P) -> Result<String> {
    Ok(format!(
        "{}.{}",
        encoding::encode_section(header)?,
        encoding::encode_section(payload)?
    ))
}

/// Splits and parses a compact JWT without verifying it.  Structural failures (wrong
/// segment count, bad base64url, bad JSON) are Error::MalformedToken; they are deliberately
/// distinct from Error::InvalidSignature so that corruption and tampering stay
/// distinguishable.
pub fn decode_jwt(jwt: &str) -> Result<DecodedJWT> {
    let segment_v: Vec<&str> = jwt.split('.').collect();
    let [header_b64, payload_b64, signature_b64] = segment_v.as_slice() else {
        return Err(Error::MalformedToken(
            "a compact JWT has exactly three dot-separated segments".into(),
        ));
    };
    if header_b64.is_empty() || payload_b64.is_empty() || signature_b64.is_empty() {
        return Err(Error::MalformedToken("JWT segment is empty".into()));
    }
    if !encoding::is_base64url_nopad(signature_b64) {
        return Err(Error::MalformedToken(
            "JWT signature segment is not base64url-no-pad encoded".into(),
        ));
    }
    let header: JWTHeader = encoding::decode_section(header_b64)?;
    let payload: JWTPayload = encoding::decode_section(payload_b64)?;
    Ok(DecodedJWT {
        header,
        payload,
        signature: (*signature_b64).to_owned(),
        signing_input: format!("{}.{}", header_b64, payload_b64),
    })
}
