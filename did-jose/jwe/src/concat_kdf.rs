use did_jose_core::{Error, Result};
use sha2::{Digest, Sha256};

fn length_prefixed(data: &[u8]) -> Vec<u8> {
    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(data);
    out
}

/// Single-step Concat KDF over SHA-256 (NIST SP 800-56A Section 5.8.1, as profiled by
/// RFC 7518 Section 4.6.2): each round hashes a big-endian round counter, the shared
/// secret, and the fixed otherinfo `AlgorithmID || PartyUInfo || PartyVInfo || SuppPubInfo`.
/// AlgorithmID and the party infos are length-prefixed; SuppPubInfo is the requested key
/// length in bits as a 4-byte big-endian integer.
pub(crate) fn concat_kdf(
    shared_secret: &[u8],
    algorithm_id: &str,
    party_u_info_o: Option<&[u8]>,
    party_v_info_o: Option<&[u8]>,
    key_len_bits: u32,
) -> Result<Vec<u8>> {
    if key_len_bits == 0 || key_len_bits % 8 != 0 {
        return Err(Error::Configuration(
            "Concat KDF key length must be a positive multiple of 8 bits".into(),
        ));
    }
    let mut other_info = length_prefixed(algorithm_id.as_bytes());
    other_info.extend(length_prefixed(party_u_info_o.unwrap_or_default()));
    other_info.extend(length_prefixed(party_v_info_o.unwrap_or_default()));
    other_info.extend(key_len_bits.to_be_bytes());

    let key_len = (key_len_bits / 8) as usize;
    let mut derived_key = Vec::with_capacity(key_len);
    let mut round = 1u32;
    while derived_key.len() < key_len {
        let mut hasher = Sha256::new();
        hasher.update(round.to_be_bytes());
        hasher.update(shared_secret);
        hasher.update(&other_info);
        derived_key.extend(hasher.finalize());
        round += 1;
    }
    derived_key.truncate(key_len);
    Ok(derived_key)
}
