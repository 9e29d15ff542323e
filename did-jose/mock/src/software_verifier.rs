use did_jose_core::{encoding, VerificationMethod};
use did_jose_jws::Verifier;

/// Verifier for the built-in signature algorithms, backed by in-process crypto.  Candidate
/// verification methods with unparsable keys are skipped rather than treated as failures,
/// so one stale key in a document doesn't mask a valid one.
pub struct SoftwareVerifier;

#[async_trait::async_trait]
impl Verifier for SoftwareVerifier {
    fn supported_verification_method_types(&self, alg: &str) -> Vec<String> {
        let type_v: &[&str] = match alg {
            "EdDSA" | "Ed25519" => &["Ed25519VerificationKey2018", "JsonWebKey2020"],
            "ES256K" | "ES256K-R" => &["EcdsaSecp256k1VerificationKey2019", "JsonWebKey2020"],
            "ES256" => &["EcdsaSecp256r1VerificationKey2019", "JsonWebKey2020"],
            _ => &[],
        };
        type_v.iter().map(|t| (*t).to_string()).collect()
    }

    async fn verify(
        &self,
        alg: &str,
        signing_input: &[u8],
        signature: &str,
        candidate_v: &[VerificationMethod],
    ) -> anyhow::Result<VerificationMethod> {
        let signature_byte_v = encoding::decode_bytes(signature)?;
        match alg {
            "EdDSA" | "Ed25519" => {
                let signature_byte_a: [u8; 64] = signature_byte_v
                    .as_slice()
                    .try_into()
                    .map_err(|_| anyhow::anyhow!("EdDSA signature must be 64 bytes"))?;
                let signature = ed25519_dalek::Signature::from_bytes(&signature_byte_a);
                for candidate in candidate_v {
                    let Ok(key_byte_v) = candidate.public_key_bytes() else {
                        continue;
                    };
                    let Ok(key_byte_a) = <[u8; 32]>::try_from(key_byte_v.as_slice()) else {
                        continue;
                    };
                    let Ok(verifying_key) = ed25519_dalek::VerifyingKey::from_bytes(&key_byte_a)
                    else {
                        continue;
                    };
                    if verifying_key.verify_strict(signing_input, &signature).is_ok() {
                        return Ok(candidate.clone());
                    }
                }
            }
            "ES256" => {
                let signature = p256::ecdsa::Signature::from_slice(&signature_byte_v)?;
                for candidate in candidate_v {
                    let Ok(key_byte_v) = candidate.public_key_bytes() else {
                        continue;
                    };
                    let Ok(verifying_key) = p256::ecdsa::VerifyingKey::from_sec1_bytes(&key_byte_v)
                    else {
                        continue;
                    };
                    if p256::ecdsa::signature::Verifier::verify(
                        &verifying_key,
                        signing_input,
                        &signature,
                    )
                    .is_ok()
                    {
                        return Ok(candidate.clone());
                    }
                }
            }
            "ES256K" => {
                let signature = k256::ecdsa::Signature::from_slice(&signature_byte_v)?;
                // Accept high-s signatures from non-normalizing signers.
                let normalized_signature = signature.normalize_s().unwrap_or(signature);
                for candidate in candidate_v {
                    let Ok(key_byte_v) = candidate.public_key_bytes() else {
                        continue;
                    };
                    let Ok(verifying_key) = k256::ecdsa::VerifyingKey::from_sec1_bytes(&key_byte_v)
                    else {
                        continue;
                    };
                    if k256::ecdsa::signature::Verifier::verify(
                        &verifying_key,
                        signing_input,
                        &normalized_signature,
                    )
                    .is_ok()
                    {
                        return Ok(candidate.clone());
                    }
                }
            }
            "ES256K-R" => {
                if signature_byte_v.len() != 65 {
                    anyhow::bail!("ES256K-R signature must be 65 bytes (r || s || v)");
                }
                let signature = k256::ecdsa::Signature::from_slice(&signature_byte_v[..64])?;
                let recovery_id = k256::ecdsa::RecoveryId::from_byte(signature_byte_v[64])
                    .ok_or_else(|| anyhow::anyhow!("invalid ES256K-R recovery byte"))?;
                let recovered_key = k256::ecdsa::VerifyingKey::recover_from_msg(
                    signing_input,
                    &signature,
                    recovery_id,
                )?;
                let recovered_point = recovered_key.to_encoded_point(false);
                for candidate in candidate_v {
                    let Ok(key_byte_v) = candidate.public_key_bytes() else {
                        continue;
                    };
                    if key_byte_v.as_slice() == recovered_point.as_bytes() {
                        return Ok(candidate.clone());
                    }
                }
            }
            _ => anyhow::bail!("unsupported signature algorithm {:?}", alg),
        }
        anyhow::bail!("signature does not verify against any candidate verification method")
    }
}
