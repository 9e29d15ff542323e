use crate::{Error, Result};

/// A DID in the generic "did:<method-name>:<method-specific-id>" form.  Only the generic
/// shape is validated here; method-specific semantics belong to the resolver.
#[derive(
    Clone,
    Debug,
    derive_more::Deref,
    derive_more::Display,
    derive_more::Into,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct DID(String);

impl DID {
    pub fn new(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if !is_did_shaped(&s) {
            return Err(Error::InvalidIssuer(
                format!("not a valid DID: {:?}", s).into(),
            ));
        }
        Ok(Self(s))
    }
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
    /// The DID method name, e.g. "example" for "did:example:123".
    pub fn method(&self) -> &str {
        self.0.split(':').nth(1).unwrap_or_default()
    }
}

/// True iff s has the generic DID shape: "did:" prefix, nonempty lowercase-alphanumeric
/// method name, nonempty method-specific id.
pub fn is_did_shaped(s: &str) -> bool {
    let Some(rest) = s.strip_prefix("did:") else {
        return false;
    };
    let Some((method, id)) = rest.split_once(':') else {
        return false;
    };
    !method.is_empty()
        && method
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && !id.is_empty()
}

impl TryFrom<String> for DID {
    type Error = Error;
    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for DID {
    type Error = Error;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl std::str::FromStr for DID {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}
