use crate::{json_shape::KeyShape, Error, PublicKeyJWK, Result, StringKeyEncoding};

/// The key material of a verification method.  Exactly one encoding is carried per verification
/// method, and which one is decided by the wire shape (string vs key object) together with the
/// property name that carried a string.
#[derive(Clone, Debug, Eq, derive_more::From, Hash, PartialEq)]
pub enum KeyFormat {
    #[from(ignore)]
    Hex(String),
    #[from(ignore)]
    Base58(String),
    #[from(ignore)]
    PEM(String),
    JWK(PublicKeyJWK),
}

impl KeyFormat {
    /// The verification method property that carries a JWK key object.
    pub const PUBLIC_KEY_JWK_PROPERTY_NAME: &'static str = "publicKeyJwk";

    /// All the verification method properties that carry key material, in emission order.
    pub const PROPERTY_NAMES: [&'static str; 4] = [
        "publicKeyHex",
        "publicKeyBase58",
        "publicKeyPem",
        Self::PUBLIC_KEY_JWK_PROPERTY_NAME,
    ];

    /// Wraps `key` in the variant named by `encoding`.  The key must be non-empty.
    pub fn from_string(encoding: StringKeyEncoding, key: String) -> Result<Self> {
        if key.is_empty() {
            return Err(Error::invalid_key_encoding(
                "string key encoding must not be empty",
            ));
        }
        Ok(match encoding {
            StringKeyEncoding::Hex => KeyFormat::Hex(key),
            StringKeyEncoding::Base58 => KeyFormat::Base58(key),
            StringKeyEncoding::PEM => KeyFormat::PEM(key),
        })
    }
    /// Decodes a raw key value.  If `value` is a string, `expected_string_encoding_o` names which
    /// string encoding it is; `None` means a string is not legal here (e.g. under `publicKeyJwk`).
    /// If `value` is a key object, the five recognized members are decoded into the JWK variant.
    pub fn decode(
        value: &serde_json::Value,
        expected_string_encoding_o: Option<StringKeyEncoding>,
    ) -> Result<Self> {
        match KeyShape::classify(value).map_err(Error::invalid_key_encoding)? {
            KeyShape::String(s) => {
                let encoding = expected_string_encoding_o.ok_or_else(|| {
                    Error::invalid_key_encoding("a string key is not allowed in this property")
                })?;
                Self::from_string(encoding, s.to_string())
            }
            KeyShape::KeyObject(object) => {
                let public_key_jwk = PublicKeyJWK::decode(object)?;
                if public_key_jwk.is_empty() {
                    return Err(Error::invalid_key_encoding(
                        "key object has no populated members",
                    ));
                }
                Ok(KeyFormat::JWK(public_key_jwk))
            }
        }
    }
    /// Inverse of [`KeyFormat::decode`].  String variants produce a bare string; the JWK variant
    /// produces an object with only its populated members.  Fails on the values `decode` would
    /// reject (an empty string, a JWK with no populated members), so nothing is emitted that
    /// can't be read back.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        match self {
            KeyFormat::Hex(key) | KeyFormat::Base58(key) | KeyFormat::PEM(key) => {
                if key.is_empty() {
                    return Err(Error::invalid_key_encoding(
                        "string key encoding must not be empty",
                    ));
                }
                Ok(serde_json::Value::String(key.clone()))
            }
            KeyFormat::JWK(public_key_jwk) => {
                if public_key_jwk.is_empty() {
                    return Err(Error::invalid_key_encoding(
                        "key object has no populated members",
                    ));
                }
                Ok(public_key_jwk.to_json_value())
            }
        }
    }
    /// The verification method property under which this key is emitted.
    pub fn property_name(&self) -> &'static str {
        match self.string_encoding_o() {
            Some(encoding) => encoding.property_name(),
            None => Self::PUBLIC_KEY_JWK_PROPERTY_NAME,
        }
    }
    pub fn string_encoding_o(&self) -> Option<StringKeyEncoding> {
        match self {
            KeyFormat::Hex(_) => Some(StringKeyEncoding::Hex),
            KeyFormat::Base58(_) => Some(StringKeyEncoding::Base58),
            KeyFormat::PEM(_) => Some(StringKeyEncoding::PEM),
            KeyFormat::JWK(_) => None,
        }
    }
    pub fn as_str_o(&self) -> Option<&str> {
        match self {
            KeyFormat::Hex(key) | KeyFormat::Base58(key) | KeyFormat::PEM(key) => {
                Some(key.as_str())
            }
            KeyFormat::JWK(_) => None,
        }
    }
    pub fn as_jwk_o(&self) -> Option<&PublicKeyJWK> {
        match self {
            KeyFormat::JWK(public_key_jwk) => Some(public_key_jwk),
            _ => None,
        }
    }
}
