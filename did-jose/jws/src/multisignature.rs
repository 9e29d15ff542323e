use crate::{jwt::now_unix, AlgorithmRegistry, JWTHeader, JWTPayload, Signer};
use did_jose_core::{encoding, Error, Result, DID};

/// One signer participating in a multisignature token.
pub struct SignerEntry<'a> {
    pub signer: &'a dyn Signer,
    pub alg: String,
}

/// One signature of a General JWS: the protected header that was signed and the resulting
/// signature, both base64url segments.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
pub struct JWSSignatureEntry {
    pub protected: String,
    pub signature: String,
}

/// JWS JSON General Serialization (RFC 7515 Section 7.2.1), restricted to the members the
/// engine produces.  Each signature entry covers the shared payload under its own protected
/// header, so any single entry is independently verifiable.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
pub struct GeneralJWS {
    /// Base64url-encoded payload, shared by all signature entries.
    pub payload: String,
    pub signatures: Vec<JWSSignatureEntry>,
}

impl GeneralJWS {
    /// Projects the signature at the given index into JWS Compact Serialization,
    /// "<protected>.<payload>.<signature>", suitable for verify_jwt.
    pub fn compact_form(&self, index: usize) -> Result<String> {
        let entry = self.signatures.get(index).ok_or_else(|| {
            Error::MalformedToken(
                format!(
                    "signature index {} out of range (JWS has {} signatures)",
                    index,
                    self.signatures.len()
                )
                .into(),
            )
        })?;
        Ok(format!(
            "{}.{}.{}",
            entry.protected, self.payload, entry.signature
        ))
    }
}

/// Signs the payload as a JWT with one signature entry per signer, in General JWS form.
/// The issuer and issuance time are injected once, before encoding, so every entry signs
/// the same payload octets.  Entry order in the output matches the input order.
pub async fn create_multisignature_jwt(
    payload: &JWTPayload,
    issuer: &DID,
    entry_v: &[SignerEntry<'_>],
    registry: &AlgorithmRegistry,
) -> Result<GeneralJWS> {
    if entry_v.is_empty() {
        return Err(Error::Configuration(
            "a multisignature JWT requires at least one signer".into(),
        ));
    }
    let mut payload = payload.clone();
    payload.iss_o = Some(issuer.as_str().to_owned());
    if payload.iat_o.is_none() {
        payload.iat_o = Some(now_unix());
    }
    let payload_b64 = encoding::encode_section(&payload)?;

    let mut signature_v = Vec::with_capacity(entry_v.len());
    for entry in entry_v {
        if entry.alg.is_empty() {
            return Err(Error::MissingAlgorithm(
                "each multisignature entry must name an algorithm".into(),
            ));
        }
        let adapter = registry.resolve(&entry.alg)?;
        let protected = encoding::encode_section(&JWTHeader::new(entry.alg.as_str()))?;
        let signing_input = format!("{}.{}", protected, payload_b64);
        tracing::debug!(alg = entry.alg.as_str(), "signing multisignature entry");
        let output = entry
            .signer
            .sign(signing_input.as_bytes())
            .await
            .map_err(Error::SigningFailed)?;
        signature_v.push(JWSSignatureEntry {
            protected,
            signature: adapter(output)?,
        });
    }
    Ok(GeneralJWS {
        payload: payload_b64,
        signatures: signature_v,
    })
}
