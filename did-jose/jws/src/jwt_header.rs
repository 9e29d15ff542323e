/// JOSE header of a JWT/JWS.  See RFC 7515 Section 4.  Unknown members survive a
/// decode/encode round trip via the flattened extension map.
#[derive(Clone, Debug, serde::Deserialize, PartialEq, serde::Serialize)]
pub struct JWTHeader {
    /// Signature algorithm identifier; selects the registry adapter.
    pub alg: String,
    #[serde(rename = "typ", skip_serializing_if = "Option::is_none")]
    pub typ_o: Option<String>,
    /// Identifies the signing key, typically a DID URL.
    #[serde(rename = "kid", skip_serializing_if = "Option::is_none")]
    pub kid_o: Option<String>,
    #[serde(flatten)]
    pub extra_m: serde_json::Map<String, serde_json::Value>,
}

impl JWTHeader {
    pub fn new(alg: impl Into<String>) -> Self {
        Self {
            alg: alg.into(),
            typ_o: Some("JWT".to_string()),
            kid_o: None,
            extra_m: serde_json::Map::new(),
        }
    }
}
