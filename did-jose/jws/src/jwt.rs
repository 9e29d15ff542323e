use crate::{create_jws, decode_jwt, AlgorithmRegistry, JWTHeader, JWTPayload, Signer, Verifier};
use did_jose_core::{DIDDocument, DIDResolver, Error, Result, VerificationMethod, DID};

/// Options for create_jwt.
pub struct JWTOptions<'a> {
    /// Set as the "iss" claim, overriding any issuer already in the payload.
    pub issuer: DID,
    pub signer: &'a dyn Signer,
    /// Token lifetime in seconds; sets "exp" relative to the issuance time.
    pub expires_in_o: Option<i64>,
}

/// Options for verify_jwt.
pub struct JWTVerifyOptions<'a> {
    pub resolver: &'a dyn DIDResolver,
    pub verifier: &'a dyn Verifier,
    /// The audience this party identifies as; when set, the token's "aud" must contain it.
    pub audience_o: Option<String>,
    /// Require the matched verification method to be in the issuer document's
    /// authentication relationship.
    pub auth: bool,
    /// Clock override in seconds since the epoch; defaults to the system clock.
    pub now_o: Option<i64>,
}

impl<'a> JWTVerifyOptions<'a> {
    pub fn new(resolver: &'a dyn DIDResolver, verifier: &'a dyn Verifier) -> Self {
        Self {
            resolver,
            verifier,
            audience_o: None,
            auth: false,
            now_o: None,
        }
    }
}

/// The result of a successful verification.
#[derive(Clone, Debug)]
pub struct VerifiedJWT {
    pub payload: JWTPayload,
    pub issuer: DID,
    /// The verification method that validated the signature.
    pub signer_method: VerificationMethod,
    /// The issuer's resolved DID document.
    pub doc: DIDDocument,
    /// The token that was verified, unchanged.
    pub jwt: String,
}

pub(crate) fn now_unix() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

/// Signs the payload as a JWT issued by options.issuer.  "iat" defaults to now (a payload
/// that already carries "iat" keeps it); "exp" is set from options.expires_in_o relative to
/// the token's validity start ("nbf", or "iat" when "nbf" is absent).
pub async fn create_jwt(
    payload: &JWTPayload,
    options: &JWTOptions<'_>,
    header: &JWTHeader,
    registry: &AlgorithmRegistry,
) -> Result<String> {
    let mut payload = payload.clone();
    payload.iss_o = Some(options.issuer.as_str().to_owned());
    if payload.iat_o.is_none() {
        payload.iat_o = Some(now_unix());
    }
    if let Some(expires_in) = options.expires_in_o {
        if expires_in < 0 {
            return Err(Error::InvalidExpiry(
                "expires_in must be non-negative".into(),
            ));
        }
        let valid_from = payload.nbf_o.or(payload.iat_o).unwrap_or_else(now_unix);
        payload.exp_o = Some(valid_from + expires_in);
    }
    create_jws(header, &payload, options.signer, registry).await
}

/// Decodes the token, resolves the issuer's DID document, verifies the signature against
/// the candidate verification methods, and then enforces the claim policy, in that order.
/// Claim checks run only after cryptographic success, so an expired-but-forged token fails
/// with Error::InvalidSignature, not Error::Expired.
pub async fn verify_jwt(jwt: &str, options: &JWTVerifyOptions<'_>) -> Result<VerifiedJWT> {
    let decoded = decode_jwt(jwt)?;
    let iss = decoded
        .payload
        .iss_o
        .as_deref()
        .ok_or(Error::InvalidIssuer("JWT has no \"iss\" claim".into()))?;
    let issuer = DID::new(iss)
        .map_err(|_| Error::InvalidIssuer(format!("\"iss\" is not a DID: {:?}", iss).into()))?;
    tracing::debug!(
        issuer = issuer.as_str(),
        alg = decoded.header.alg.as_str(),
        "verifying JWT"
    );

    let doc = options
        .resolver
        .resolve_did_document(issuer.as_str())
        .await
        .map_err(Error::IssuerResolutionFailed)?;

    let supported_type_v = options
        .verifier
        .supported_verification_method_types(&decoded.header.alg);
    let candidate_v: Vec<VerificationMethod> = doc
        .verification_methods_of_type(&supported_type_v)
        .cloned()
        .collect();
    if candidate_v.is_empty() {
        return Err(Error::NoMatchingKey(
            format!(
                "DID document for {} has no verification method of a type supported for alg {:?}",
                issuer, decoded.header.alg
            )
            .into(),
        ));
    }
    let signer_method = options
        .verifier
        .verify(
            &decoded.header.alg,
            decoded.signing_input.as_bytes(),
            &decoded.signature,
            &candidate_v,
        )
        .await
        .map_err(|e| Error::InvalidSignature(e.to_string().into()))?;
    tracing::debug!(
        verification_method = signer_method.id.as_str(),
        "signature verified"
    );

    // Claim policy, in order: exp, nbf (iat standing in when nbf is absent), aud, auth.
    let now = options.now_o.unwrap_or_else(now_unix);
    if let Some(exp) = decoded.payload.exp_o {
        if now >= exp {
            return Err(Error::Expired(
                format!("JWT expired at {} (now {})", exp, now).into(),
            ));
        }
    }
    if let Some(nbf) = decoded.payload.nbf_o.or(decoded.payload.iat_o) {
        if now < nbf {
            return Err(Error::NotYetValid(
                format!("JWT not valid before {} (now {})", nbf, now).into(),
            ));
        }
    }
    if let Some(expected_audience) = options.audience_o.as_deref() {
        let matched = decoded
            .payload
            .aud_o
            .as_ref()
            .map(|aud| aud.contains(expected_audience))
            .unwrap_or(false);
        if !matched {
            return Err(Error::AudienceMismatch(
                format!("JWT \"aud\" does not include {:?}", expected_audience).into(),
            ));
        }
    }
    if options.auth && !doc.is_authentication_method(&signer_method.id) {
        return Err(Error::AuthenticationFailed(
            format!(
                "verification method {} is not in the authentication relationship of {}",
                signer_method.id, issuer
            )
            .into(),
        ));
    }

    Ok(VerifiedJWT {
        payload: decoded.payload,
        issuer,
        signer_method,
        doc,
        jwt: jwt.to_owned(),
    })
}
