use crate::concat_kdf::concat_kdf;
use crate::content_encryption::{
    decrypt_content, encrypt_content, CONTENT_ENCRYPTION_ALG, CONTENT_KEY_LEN,
};
use crate::key_agreement::{derive_shared_secret, KeyAgreementAlg};
use crate::key_wrap::{unwrap_key, wrap_key};
use did_jose_core::{encoding, Error, PublicKeyJWK, Result};
use rand::RngCore;
use zeroize::Zeroizing;

/// Protected header of a JWE.  Direct agreement (ECDH-ES) carries "alg" and the ephemeral
/// public key here; key-wrapping modes leave those to the per-recipient headers and only
/// pin "enc" (and, for ECDH-1PU, the sender key id "skid").
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
pub struct JWEProtectedHeader {
    #[serde(rename = "alg", skip_serializing_if = "Option::is_none")]
    pub alg_o: Option<String>,
    pub enc: String,
    #[serde(rename = "skid", skip_serializing_if = "Option::is_none")]
    pub skid_o: Option<String>,
    #[serde(rename = "epk", skip_serializing_if = "Option::is_none")]
    pub epk_o: Option<PublicKeyJWK>,
    #[serde(rename = "apu", skip_serializing_if = "Option::is_none")]
    pub apu_o: Option<String>,
    #[serde(rename = "apv", skip_serializing_if = "Option::is_none")]
    pub apv_o: Option<String>,
}

/// Per-recipient header of a key-wrapping JWE: the wrap algorithm, the recipient-specific
/// ephemeral public key, and the wrap's nonce and tag.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
pub struct JWERecipientHeader {
    pub alg: String,
    pub epk: PublicKeyJWK,
    pub iv: String,
    pub tag: String,
    #[serde(rename = "kid", skip_serializing_if = "Option::is_none")]
    pub kid_o: Option<String>,
    #[serde(rename = "apu", skip_serializing_if = "Option::is_none")]
    pub apu_o: Option<String>,
    #[serde(rename = "apv", skip_serializing_if = "Option::is_none")]
    pub apv_o: Option<String>,
}

#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
pub struct JWERecipient {
    #[serde(rename = "header", skip_serializing_if = "Option::is_none")]
    pub header_o: Option<JWERecipientHeader>,
    pub encrypted_key: String,
}

/// JWE JSON serialization (RFC 7516 Section 7.2), restricted to the members the engine
/// produces.  All string members are base64url-no-pad segments.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
pub struct JWE {
    pub protected: String,
    /// Empty for direct agreement, where no key travels with the envelope.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<JWERecipient>,
    #[serde(rename = "aad", skip_serializing_if = "Option::is_none")]
    pub aad_o: Option<String>,
    pub iv: String,
    pub ciphertext: String,
    pub tag: String,
}

impl JWE {
    pub fn protected_header(&self) -> Result<JWEProtectedHeader> {
        encoding::decode_section(&self.protected)
            .map_err(|_| Error::MalformedEnvelope("JWE protected header does not decode".into()))
    }
    /// JWE Compact Serialization,
    /// "<protected>.<encrypted_key>.<iv>.<ciphertext>.<tag>".  Only a direct-agreement
    /// envelope without aad has one: key-wrapping recipients carry per-recipient headers
    /// the compact form cannot represent.
    pub fn compact_form(&self) -> Result<String> {
        if !self.recipients.is_empty() || self.aad_o.is_some() {
            return Err(Error::MalformedEnvelope(
                "only a single-recipient direct-agreement JWE without aad has a compact form"
                    .into(),
            ));
        }
        Ok(format!(
            "{}..{}.{}.{}",
            self.protected, self.iv, self.ciphertext, self.tag
        ))
    }
    pub fn from_compact(compact: &str) -> Result<Self> {
        let segment_v: Vec<&str> = compact.split('.').collect();
        let [protected, encrypted_key, iv, ciphertext, tag] = segment_v.as_slice() else {
            return Err(Error::MalformedEnvelope(
                "a compact JWE has exactly five dot-separated segments".into(),
            ));
        };
        if protected.is_empty() || iv.is_empty() || tag.is_empty() {
            return Err(Error::MalformedEnvelope("JWE segment is empty".into()));
        }
        for segment in [protected, encrypted_key, iv, ciphertext, tag] {
            if !encoding::is_base64url_nopad(segment) {
                return Err(Error::MalformedEnvelope(
                    "JWE segment is not base64url-no-pad encoded".into(),
                ));
            }
        }
        let recipients = if encrypted_key.is_empty() {
            Vec::new()
        } else {
            vec![JWERecipient {
                header_o: None,
                encrypted_key: (*encrypted_key).to_owned(),
            }]
        };
        Ok(Self {
            protected: (*protected).to_owned(),
            recipients,
            aad_o: None,
            iv: (*iv).to_owned(),
            ciphertext: (*ciphertext).to_owned(),
            tag: (*tag).to_owned(),
        })
    }
    /// The associated data covering the content encryption: the raw protected segment,
    /// extended with the aad segment when present (RFC 7516 Section 5.1 step 14).
    fn associated_data(&self) -> Vec<u8> {
        match self.aad_o.as_deref() {
            Some(aad) => format!("{}.{}", self.protected, aad).into_bytes(),
            None => self.protected.clone().into_bytes(),
        }
    }
}

/// One recipient of a JWE: their static X25519 public key and, optionally, the key id to
/// record in their recipient header (and bind into the KDF as PartyVInfo).
pub struct JWERecipientKey {
    pub public_key: [u8; 32],
    pub kid_o: Option<String>,
}

impl JWERecipientKey {
    pub fn new(public_key: [u8; 32]) -> Self {
        Self {
            public_key,
            kid_o: None,
        }
    }
    pub fn with_kid(public_key: [u8; 32], kid: impl Into<String>) -> Self {
        Self {
            public_key,
            kid_o: Some(kid.into()),
        }
    }
}

/// The sender's static X25519 key, required for ECDH-1PU.  The key id is recorded as
/// "skid" in the protected header and bound into the KDF as PartyUInfo.
pub struct JWESender {
    pub secret: [u8; 32],
    pub skid_o: Option<String>,
}

#[derive(Default)]
pub struct JWEOptions {
    pub sender_o: Option<JWESender>,
    /// Additional authenticated data, carried in the envelope and bound into the tag.
    pub aad_o: Option<Vec<u8>>,
}

/// The recipient's decryption key material.  ECDH-1PU envelopes additionally need the
/// sender's static public key to recompute the static-static agreement.
pub struct JWEDecryptionKey {
    pub secret: [u8; 32],
    pub sender_public_o: Option<[u8; 32]>,
}

fn decode_envelope_bytes(segment: &str) -> Result<Vec<u8>> {
    encoding::decode_bytes(segment)
        .map_err(|_| Error::MalformedEnvelope("JWE segment is not base64url-no-pad encoded".into()))
}

fn ephemeral_public_key_bytes(epk: &PublicKeyJWK) -> Result<Vec<u8>> {
    if epk.kty != "OKP" || epk.crv != "X25519" {
        return Err(Error::MalformedEnvelope(
            "JWE ephemeral key must be an OKP X25519 key".into(),
        ));
    }
    epk.public_key_bytes()
        .map_err(|_| Error::MalformedEnvelope("JWE ephemeral key does not decode".into()))
}

/// Encrypts the plaintext for the given recipients.  ECDH-ES derives the content key
/// directly and supports exactly one recipient; the +XC20PKW modes generate a random
/// content key and wrap it once per recipient under an independently derived wrapping key,
/// preserving the recipient order in the output.
pub fn create_jwe(
    plaintext: &[u8],
    recipient_v: &[JWERecipientKey],
    alg: KeyAgreementAlg,
    options: &JWEOptions,
) -> Result<JWE> {
    if recipient_v.is_empty() {
        return Err(Error::Configuration(
            "a JWE requires at least one recipient".into(),
        ));
    }
    if alg == KeyAgreementAlg::EcdhEs && recipient_v.len() != 1 {
        return Err(Error::Configuration(
            "ECDH-ES direct agreement supports exactly one recipient; use a key-wrapping \
             variant for more"
                .into(),
        ));
    }
    let sender_o = match alg {
        KeyAgreementAlg::Ecdh1puXc20pkw => Some(options.sender_o.as_ref().ok_or(
            Error::MissingSenderKey("ECDH-1PU requires the sender's static key".into()),
        )?),
        _ => None,
    };
    tracing::debug!(alg = alg.as_str(), recipients = recipient_v.len(), "creating JWE");

    let mut cek = Zeroizing::new(vec![0u8; CONTENT_KEY_LEN]);
    let mut recipient_out_v = Vec::new();
    let protected = if alg.uses_key_wrap() {
        rand::rngs::OsRng.fill_bytes(cek.as_mut_slice());
        JWEProtectedHeader {
            alg_o: None,
            enc: CONTENT_ENCRYPTION_ALG.to_string(),
            skid_o: sender_o.and_then(|sender| sender.skid_o.clone()),
            epk_o: None,
            apu_o: None,
            apv_o: None,
        }
    } else {
        let recipient = &recipient_v[0];
        let ephemeral_secret = x25519_dalek::StaticSecret::random_from_rng(rand::rngs::OsRng);
        let ephemeral_public = x25519_dalek::PublicKey::from(&ephemeral_secret);
        let z = Zeroizing::new(derive_shared_secret(&ephemeral_secret, &recipient.public_key)?);
        *cek = concat_kdf(
            z.as_slice(),
            CONTENT_ENCRYPTION_ALG,
            None,
            None,
            (CONTENT_KEY_LEN * 8) as u32,
        )?;
        JWEProtectedHeader {
            alg_o: Some(alg.as_str().to_string()),
            enc: CONTENT_ENCRYPTION_ALG.to_string(),
            skid_o: None,
            epk_o: Some(PublicKeyJWK::okp("X25519", ephemeral_public.as_bytes())),
            apu_o: None,
            apv_o: None,
        }
    };

    if alg.uses_key_wrap() {
        let sender_secret_o = sender_o.map(|sender| x25519_dalek::StaticSecret::from(sender.secret));
        let apu_byte_vo = sender_o
            .and_then(|sender| sender.skid_o.as_deref())
            .map(|skid| skid.as_bytes().to_vec());
        for recipient in recipient_v {
            let ephemeral_secret = x25519_dalek::StaticSecret::random_from_rng(rand::rngs::OsRng);
            let ephemeral_public = x25519_dalek::PublicKey::from(&ephemeral_secret);
            let mut z = Zeroizing::new(
                derive_shared_secret(&ephemeral_secret, &recipient.public_key)?.to_vec(),
            );
            if let Some(sender_secret) = sender_secret_o.as_ref() {
                z.extend(derive_shared_secret(sender_secret, &recipient.public_key)?);
            }
            let apv_byte_vo = recipient
                .kid_o
                .as_deref()
                .map(|kid| kid.as_bytes().to_vec());
            let kek = Zeroizing::new(concat_kdf(
                z.as_slice(),
                alg.as_str(),
                apu_byte_vo.as_deref(),
                apv_byte_vo.as_deref(),
                256,
            )?);
            let wrapped = wrap_key(&kek, &cek)?;
            recipient_out_v.push(JWERecipient {
                header_o: Some(JWERecipientHeader {
                    alg: alg.as_str().to_string(),
                    epk: PublicKeyJWK::okp("X25519", ephemeral_public.as_bytes()),
                    iv: encoding::encode_bytes(&wrapped.iv),
                    tag: encoding::encode_bytes(&wrapped.tag),
                    kid_o: recipient.kid_o.clone(),
                    apu_o: apu_byte_vo.as_deref().map(encoding::encode_bytes),
                    apv_o: apv_byte_vo.as_deref().map(encoding::encode_bytes),
                }),
                encrypted_key: encoding::encode_bytes(&wrapped.encrypted_key),
            });
        }
    }

    let protected_b64 = encoding::encode_section(&protected)?;
    let aad_b64_o = options.aad_o.as_deref().map(encoding::encode_bytes);
    let associated_data = match aad_b64_o.as_deref() {
        Some(aad) => format!("{}.{}", protected_b64, aad).into_bytes(),
        None => protected_b64.clone().into_bytes(),
    };
    let encrypted = encrypt_content(&cek, &associated_data, plaintext)?;
    Ok(JWE {
        protected: protected_b64,
        recipients: recipient_out_v,
        aad_o: aad_b64_o,
        iv: encoding::encode_bytes(&encrypted.iv),
        ciphertext: encoding::encode_bytes(&encrypted.ciphertext),
        tag: encoding::encode_bytes(&encrypted.tag),
    })
}

/// Decrypts a JWE with the recipient's key material.  Key-wrapping recipients are tried in
/// declared order; if none of the wraps open under this key the failure is
/// Error::KeyWrapFailed, and a wrap that opens but whose content tag mismatches is
/// Error::DecryptionFailed.  Neither carries detail about where the mismatch occurred.
pub fn decrypt_jwe(jwe: &JWE, key: &JWEDecryptionKey) -> Result<Vec<u8>> {
    let protected = jwe.protected_header()?;
    if protected.enc != CONTENT_ENCRYPTION_ALG {
        return Err(Error::UnsupportedAlgorithm(protected.enc.into()));
    }
    let associated_data = jwe.associated_data();
    let iv = decode_envelope_bytes(&jwe.iv)?;
    let tag = decode_envelope_bytes(&jwe.tag)?;
    let ciphertext = decode_envelope_bytes(&jwe.ciphertext)?;
    let local_secret = x25519_dalek::StaticSecret::from(key.secret);

    if let Some(alg) = protected.alg_o.as_deref() {
        if KeyAgreementAlg::from_str(alg)? != KeyAgreementAlg::EcdhEs {
            return Err(Error::MalformedEnvelope(
                "key-wrapping algorithms belong in per-recipient headers".into(),
            ));
        }
        let epk = protected.epk_o.as_ref().ok_or(Error::MalformedEnvelope(
            "direct-agreement JWE is missing \"epk\"".into(),
        ))?;
        let z = Zeroizing::new(derive_shared_secret(
            &local_secret,
            &ephemeral_public_key_bytes(epk)?,
        )?);
        let cek = Zeroizing::new(concat_kdf(
            z.as_slice(),
            CONTENT_ENCRYPTION_ALG,
            None,
            None,
            (CONTENT_KEY_LEN * 8) as u32,
        )?);
        return decrypt_content(&cek, &iv, &tag, &associated_data, &ciphertext);
    }

    if jwe.recipients.is_empty() {
        return Err(Error::MalformedEnvelope("JWE has no recipients".into()));
    }
    let mut last_error = Error::KeyWrapFailed;
    for recipient in &jwe.recipients {
        let header = recipient.header_o.as_ref().ok_or(Error::MalformedEnvelope(
            "key-wrapping JWE recipient is missing its header".into(),
        ))?;
        let alg = KeyAgreementAlg::from_str(&header.alg)?;
        let mut z = Zeroizing::new(
            derive_shared_secret(&local_secret, &ephemeral_public_key_bytes(&header.epk)?)?
                .to_vec(),
        );
        match alg {
            KeyAgreementAlg::EcdhEsXc20pkw => {}
            KeyAgreementAlg::Ecdh1puXc20pkw => {
                let sender_public = key.sender_public_o.as_ref().ok_or(Error::MissingSenderKey(
                    "decrypting an ECDH-1PU JWE requires the sender's static public key".into(),
                ))?;
                z.extend(derive_shared_secret(&local_secret, sender_public)?);
            }
            KeyAgreementAlg::EcdhEs => {
                return Err(Error::MalformedEnvelope(
                    "direct agreement belongs in the protected header".into(),
                ));
            }
        }
        let apu_byte_vo = header.apu_o.as_deref().map(decode_envelope_bytes).transpose()?;
        let apv_byte_vo = header.apv_o.as_deref().map(decode_envelope_bytes).transpose()?;
        let kek = Zeroizing::new(concat_kdf(
            z.as_slice(),
            &header.alg,
            apu_byte_vo.as_deref(),
            apv_byte_vo.as_deref(),
            256,
        )?);
        let wrap_iv = decode_envelope_bytes(&header.iv)?;
        let wrap_tag = decode_envelope_bytes(&header.tag)?;
        let encrypted_key = decode_envelope_bytes(&recipient.encrypted_key)?;
        match unwrap_key(&kek, &encrypted_key, &wrap_iv, &wrap_tag) {
            Ok(cek) => {
                let cek = Zeroizing::new(cek);
                return decrypt_content(&cek, &iv, &tag, &associated_data, &ciphertext);
            }
            Err(e) => {
                last_error = e;
            }
        }
    }
    Err(last_error)
}
