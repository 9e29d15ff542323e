use crate::{encoding, Error, Result};

/// The subset of a JWK that verification and key agreement consume: key type, curve, and the
/// public coordinate(s).  Key lifecycle and private members are out of scope.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
pub struct PublicKeyJWK {
    /// Key type: "OKP" or "EC".
    pub kty: String,
    /// Curve: e.g. "Ed25519", "X25519", "secp256k1", "P-256".
    pub crv: String,
    /// base64url-no-pad encoded public key (OKP) or x coordinate (EC).
    pub x: String,
    /// base64url-no-pad encoded y coordinate; EC keys only.
    #[serde(rename = "y", skip_serializing_if = "Option::is_none")]
    pub y_o: Option<String>,
}

impl PublicKeyJWK {
    pub fn okp(crv: impl Into<String>, public_key: &[u8]) -> Self {
        Self {
            kty: "OKP".to_string(),
            crv: crv.into(),
            x: encoding::encode_bytes(public_key),
            y_o: None,
        }
    }
    pub fn ec(crv: impl Into<String>, x: &[u8], y: &[u8]) -> Self {
        Self {
            kty: "EC".to_string(),
            crv: crv.into(),
            x: encoding::encode_bytes(x),
            y_o: Some(encoding::encode_bytes(y)),
        }
    }
    /// Raw public key bytes: the x member for OKP keys, or the SEC1 uncompressed point
    /// 0x04 || x || y for EC keys.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>> {
        match self.kty.as_str() {
            "OKP" => encoding::decode_bytes(&self.x)
                .map_err(|_| Error::InvalidDocument("JWK \"x\" is not base64url-encoded".into())),
            "EC" => {
                let y = self.y_o.as_deref().ok_or(Error::InvalidDocument(
                    "EC JWK is missing the \"y\" member".into(),
                ))?;
                let mut sec1 = vec![0x04u8];
                sec1.extend(encoding::decode_bytes(&self.x).map_err(|_| {
                    Error::InvalidDocument("JWK \"x\" is not base64url-encoded".into())
                })?);
                sec1.extend(encoding::decode_bytes(y).map_err(|_| {
                    Error::InvalidDocument("JWK \"y\" is not base64url-encoded".into())
                })?);
                Ok(sec1)
            }
            _ => Err(Error::InvalidDocument(
                format!("unsupported JWK \"kty\": {:?}", self.kty).into(),
            )),
        }
    }
}
