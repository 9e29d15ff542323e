use crate::{EcdsaSignature, SignatureOutput};
use did_jose_core::{encoding, Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Normalizes a Signer's output to the base64url JOSE signature encoding for one "alg"
/// value.
pub type AlgorithmAdapter = Arc<dyn Fn(SignatureOutput) -> Result<String> + Send + Sync>;

/// Maps JOSE "alg" identifiers to signature-encoding adapters.  Entries are append-only and
/// unique for the registry's lifetime; registration of an existing identifier fails, also
/// under concurrent registration attempts (the write lock serializes them).
///
/// The registry is an injectable object rather than process-global state: create one with
/// the built-ins at startup and share it by Arc; tests create their own instances.
pub struct AlgorithmRegistry {
    adapter_m: RwLock<HashMap<String, AlgorithmAdapter>>,
}

impl AlgorithmRegistry {
    /// An empty registry.  Most callers want with_builtins.
    pub fn new() -> Self {
        Self {
            adapter_m: RwLock::new(HashMap::new()),
        }
    }
    /// A registry pre-populated with ES256, ES256K, ES256K-R, Ed25519, and EdDSA.
    /// "Ed25519" is a legacy alias resolving to the same adapter as "EdDSA"; "ES256K-R" is
    /// the non-standard recoverable-signature compatibility mode.  Both are retained
    /// bit-for-bit for interoperability with tokens already in the wild.
    pub fn with_builtins() -> Self {
        let eddsa = eddsa_adapter();
        let adapter_m = HashMap::from([
            ("ES256".to_string(), ec_adapter()),
            ("ES256K".to_string(), ec_adapter()),
            ("ES256K-R".to_string(), ec_recoverable_adapter()),
            ("Ed25519".to_string(), eddsa.clone()),
            ("EdDSA".to_string(), eddsa),
        ]);
        Self {
            adapter_m: RwLock::new(adapter_m),
        }
    }
    pub fn register(&self, alg: &str, adapter: AlgorithmAdapter) -> Result<()> {
        if alg.is_empty() {
            return Err(Error::InvalidAlgorithmName(
                "algorithm identifier must be nonempty".into(),
            ));
        }
        let mut adapter_m = self.adapter_m.write().unwrap();
        if adapter_m.contains_key(alg) {
            return Err(Error::DuplicateAlgorithm(alg.to_owned().into()));
        }
        adapter_m.insert(alg.to_owned(), adapter);
        Ok(())
    }
    pub fn resolve(&self, alg: &str) -> Result<AlgorithmAdapter> {
        self.adapter_m
            .read()
            .unwrap()
            .get(alg)
            .cloned()
            .ok_or_else(|| Error::UnsupportedAlgorithm(alg.to_owned().into()))
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// ES256/ES256K: structured signatures are encoded as base64url(r || s); pre-encoded
/// signatures pass through unchanged.
fn ec_adapter() -> AlgorithmAdapter {
    Arc::new(|output| match output {
        SignatureOutput::Structured(EcdsaSignature { r, s, .. }) => {
            let mut byte_v = r;
            byte_v.extend(s);
            Ok(encoding::encode_bytes(&byte_v))
        }
        SignatureOutput::Encoded(signature) => Ok(signature),
    })
}

/// ES256K-R: as the EC adapter but with the recovery byte appended, yielding the 65-byte
/// r || s || v form.  A pre-encoded signature that is not in recoverable form is rejected.
fn ec_recoverable_adapter() -> AlgorithmAdapter {
    Arc::new(|output| match output {
        SignatureOutput::Structured(EcdsaSignature {
            r,
            s,
            recovery_param_o,
        }) => {
            let recovery_param = recovery_param_o.ok_or(Error::RecoveryParamMissing(
                "ES256K-R requires the signer to supply a recovery param".into(),
            ))?;
            let mut byte_v = r;
            byte_v.extend(s);
            byte_v.push(recovery_param);
            Ok(encoding::encode_bytes(&byte_v))
        }
        SignatureOutput::Encoded(signature) => {
            let byte_v = encoding::decode_bytes(&signature)?;
            if byte_v.len() != 65 {
                return Err(Error::RecoveryParamMissing(
                    "pre-encoded ES256K-R signature is not in recoverable (r || s || v) form"
                        .into(),
                ));
            }
            Ok(signature)
        }
    })
}

/// EdDSA has no split r/s JOSE encoding path here: the signer must return a pre-encoded
/// signature.
fn eddsa_adapter() -> AlgorithmAdapter {
    Arc::new(|output| match output {
        SignatureOutput::Encoded(signature) => Ok(signature),
        SignatureOutput::Structured(_) => Err(Error::UnexpectedSignatureShape(
            "EdDSA signer must return a pre-encoded signature, not ECDSA components".into(),
        )),
    })
}
