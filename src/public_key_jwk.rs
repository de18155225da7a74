use crate::{json_shape::json_type_name, Error, Result};

/// The multi-member key object carried by `publicKeyJwk`.  Only the five members below are
/// modeled; any other members of the wire object are dropped on decode.  Absent members are
/// omitted on encode (never emitted as null).
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, serde::Deserialize, Eq, Hash, PartialEq, serde::Serialize)]
pub struct PublicKeyJWK {
    #[serde(rename = "crv")]
    pub crv_o: Option<String>,
    #[serde(rename = "kid")]
    pub kid_o: Option<String>,
    #[serde(rename = "kty")]
    pub kty_o: Option<String>,
    #[serde(rename = "x")]
    pub x_o: Option<String>,
    #[serde(rename = "y")]
    pub y_o: Option<String>,
}

impl PublicKeyJWK {
    // "kty" of "EC" is used for curves including "secp256k1", "P-256", "P-384", and "P-521".
    pub fn ec(crv: String, x: String, y: String) -> Self {
        Self {
            crv_o: Some(crv),
            kid_o: None,
            kty_o: Some("EC".into()),
            x_o: Some(x),
            y_o: Some(y),
        }
    }
    // "kty" of "OKP" is used for curves including "Ed25519" and "X25519".
    pub fn okp(crv: String, x: String) -> Self {
        Self {
            crv_o: Some(crv),
            kid_o: None,
            kty_o: Some("OKP".into()),
            x_o: Some(x),
            y_o: None,
        }
    }
    pub fn with_kid(mut self, kid: String) -> Self {
        self.kid_o = Some(kid);
        self
    }
    /// True iff none of the five members are populated.  Such a value cannot be told apart from
    /// a non-key object on the wire, so it is rejected on decode.
    pub fn is_empty(&self) -> bool {
        self.crv_o.is_none()
            && self.kid_o.is_none()
            && self.kty_o.is_none()
            && self.x_o.is_none()
            && self.y_o.is_none()
    }
    /// Decodes the five recognized members of a key object.  Each must be a string when present
    /// (a JSON null counts as absent).  The caller is responsible for having classified `object`
    /// as a key object.
    pub(crate) fn decode(object: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        for name in object.keys() {
            if !crate::json_shape::KEY_OBJECT_MEMBER_NAMES.contains(&name.as_str()) {
                tracing::debug!("dropping unrecognized key object member {:?}", name);
            }
        }
        Ok(Self {
            crv_o: decode_member(object, "crv")?,
            kid_o: decode_member(object, "kid")?,
            kty_o: decode_member(object, "kty")?,
            x_o: decode_member(object, "x")?,
            y_o: decode_member(object, "y")?,
        })
    }
    pub(crate) fn to_json_value(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        let member_v = [
            ("crv", &self.crv_o),
            ("kid", &self.kid_o),
            ("kty", &self.kty_o),
            ("x", &self.x_o),
            ("y", &self.y_o),
        ];
        for (name, value_o) in member_v {
            if let Some(value) = value_o {
                object.insert(name.into(), serde_json::Value::String(value.clone()));
            }
        }
        serde_json::Value::Object(object)
    }
}

fn decode_member(
    object: &serde_json::Map<String, serde_json::Value>,
    name: &'static str,
) -> Result<Option<String>> {
    match object.get(name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::invalid_key_encoding(format!(
            "key object member must be a string, found {}",
            json_type_name(other)
        ))
        .within(name)),
    }
}
