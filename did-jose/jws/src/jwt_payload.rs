/// The "aud" claim: a single audience or a set of audiences.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == audience,
            Audience::Many(aud_v) => aud_v.iter().any(|aud| aud == audience),
        }
    }
}

/// JWT claims set.  Reserved claims carry the RFC 7519 semantics (times in seconds since
/// the epoch); everything else lives in the flattened extension map and is treated as
/// opaque JSON by the engine.
#[derive(Clone, Debug, Default, serde::Deserialize, PartialEq, serde::Serialize)]
pub struct JWTPayload {
    #[serde(rename = "iss", skip_serializing_if = "Option::is_none")]
    pub iss_o: Option<String>,
    #[serde(rename = "sub", skip_serializing_if = "Option::is_none")]
    pub sub_o: Option<String>,
    #[serde(rename = "aud", skip_serializing_if = "Option::is_none")]
    pub aud_o: Option<Audience>,
    #[serde(rename = "exp", skip_serializing_if = "Option::is_none")]
    pub exp_o: Option<i64>,
    #[serde(rename = "nbf", skip_serializing_if = "Option::is_none")]
    pub nbf_o: Option<i64>,
    #[serde(rename = "iat", skip_serializing_if = "Option::is_none")]
    pub iat_o: Option<i64>,
    #[serde(flatten)]
    pub extra_m: serde_json::Map<String, serde_json::Value>,
}

impl JWTPayload {
    /// A payload with a single extension claim; convenience for tests and simple tokens.
    pub fn with_claim(name: impl Into<String>, value: serde_json::Value) -> Self {
        let mut payload = Self::default();
        payload.extra_m.insert(name.into(), value);
        payload
    }
}
