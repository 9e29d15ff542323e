//! base64url-no-pad section encoding shared by the JWS and JWE paths.  A "section" is one
//! dot-separated segment of a JOSE compact serialization, or one base64url field of a JSON
//! serialization.

use crate::{Error, Result};
use base64::Engine;

/// JSON-serialize the value and base64url-no-pad encode it.
pub fn encode_section<T: serde::Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value)
        .map_err(|e| Error::MalformedToken(format!("could not serialize section: {}", e).into()))?;
    Ok(encode_bytes(&json))
}

/// base64url-no-pad decode the section and parse it as JSON.
pub fn decode_section<T: serde::de::DeserializeOwned>(section: &str) -> Result<T> {
    let bytes = decode_bytes(section)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        Error::MalformedToken(format!("section is not the expected JSON structure: {}", e).into())
    })
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

pub fn decode_bytes(section: &str) -> Result<Vec<u8>> {
    if !is_base64url_nopad(section) {
        return Err(Error::MalformedToken(
            "section is not base64url-no-pad encoded".into(),
        ));
    }
    base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(section.as_bytes())
        .map_err(|e| Error::MalformedToken(format!("could not decode section: {}", e).into()))
}

/// Alphabet check applied before decoding; rejects padding and whitespace outright.
pub fn is_base64url_nopad(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
