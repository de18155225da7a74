use crate::{
    json_shape::json_type_name, key_types, Error, KeyFormat, PublicKeyJWK, Result,
    StringKeyEncoding, URI,
};

/// A verification method, either listed in the document's `verificationMethod` field or embedded
/// directly in one of the verification relationship fields.  Verification methods carry no
/// extension bag; unrecognized members are dropped on decode.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct VerificationMethod {
    /// May be a fragment-only relative reference such as `#key-1`.
    pub id: URI,
    /// Names a registered key/signature suite, e.g. "Ed25519VerificationKey2018".  See [`key_types`].
    pub r#type: String,
    pub controller_o: Option<URI>,
    pub key_format: KeyFormat,
}

impl VerificationMethod {
    pub fn new(id: URI, r#type: String, controller_o: Option<URI>, key_format: KeyFormat) -> Self {
        Self {
            id,
            r#type,
            controller_o,
            key_format,
        }
    }
    /// Convenience method for making a JsonWebKey2020 entry whose id is `controller#key_id_fragment`.
    /// The kid member of the key is set to the same id.
    pub fn json_web_key_2020(
        controller: URI,
        key_id_fragment: &str,
        public_key_jwk: PublicKeyJWK,
    ) -> Result<Self> {
        let id = URI::try_from(format!("{}#{}", controller, key_id_fragment))?;
        let public_key_jwk = public_key_jwk.with_kid(id.to_string());
        Ok(Self {
            id,
            r#type: key_types::JSON_WEB_KEY_2020.into(),
            controller_o: Some(controller),
            key_format: KeyFormat::JWK(public_key_jwk),
        })
    }
    /// Decodes a member of the `verificationMethod` array.
    pub fn try_from_json_value(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(object) => Self::decode(object),
            other => Err(Error::invalid_verification_method(format!(
                "expected an object, found {}",
                json_type_name(other)
            ))),
        }
    }
    /// Decodes a verification method from a JSON object.  Exactly one of the key properties
    /// (`publicKeyHex`, `publicKeyBase58`, `publicKeyPem`, `publicKeyJwk`) must be present; the
    /// property name determines the encoding of a bare string key.
    pub fn decode(object: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let id = match object.get("id") {
            Some(serde_json::Value::String(s)) => URI::try_from(s.as_str()),
            Some(other) => Err(Error::invalid_identifier(format!(
                "identifier must be a string, found {}",
                json_type_name(other)
            ))),
            None => Err(Error::invalid_verification_method("missing member")),
        }
        .map_err(|e| e.within("id"))?;
        let r#type = match object.get("type") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(Error::invalid_verification_method(format!(
                    "type must be a string, found {}",
                    json_type_name(other)
                ))
                .within("type"))
            }
            None => {
                return Err(Error::invalid_verification_method("missing member").within("type"))
            }
        };
        let controller_o = match object.get("controller") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => {
                Some(URI::try_from(s.as_str()).map_err(|e| e.within("controller"))?)
            }
            Some(other) => {
                return Err(Error::invalid_identifier(format!(
                    "controller must be a string, found {}",
                    json_type_name(other)
                ))
                .within("controller"))
            }
        };

        let mut key_format_o = None;
        for property_name in KeyFormat::PROPERTY_NAMES {
            let value = match object.get(property_name) {
                None | Some(serde_json::Value::Null) => continue,
                Some(value) => value,
            };
            if key_format_o.is_some() {
                return Err(Error::invalid_key_encoding(
                    "a verification method must not carry more than one key property",
                )
                .within(property_name));
            }
            let expected_string_encoding_o = StringKeyEncoding::from_property_name(property_name);
            key_format_o = Some(
                KeyFormat::decode(value, expected_string_encoding_o)
                    .map_err(|e| e.within(property_name))?,
            );
        }
        let key_format = key_format_o.ok_or_else(|| {
            Error::invalid_key_encoding(
                "missing key material (expected one of publicKeyHex, publicKeyBase58, publicKeyPem, publicKeyJwk)",
            )
        })?;

        for name in object.keys() {
            if !Self::is_recognized_member(name) {
                tracing::debug!(
                    "dropping unrecognized member {:?} of verification method {}",
                    name,
                    id
                );
            }
        }

        Ok(Self {
            id,
            r#type,
            controller_o,
            key_format,
        })
    }
    /// Inverse of [`VerificationMethod::decode`].  Members are emitted in the order id, type,
    /// controller, key property.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        let property_name = self.key_format.property_name();
        let key_value = self
            .key_format
            .to_json_value()
            .map_err(|e| e.within(property_name))?;
        let mut object = serde_json::Map::new();
        object.insert("id".into(), self.id.to_string().into());
        object.insert("type".into(), self.r#type.clone().into());
        if let Some(controller) = self.controller_o.as_ref() {
            object.insert("controller".into(), controller.to_string().into());
        }
        object.insert(property_name.into(), key_value);
        Ok(serde_json::Value::Object(object))
    }
    fn is_recognized_member(name: &str) -> bool {
        matches!(name, "id" | "type" | "controller") || KeyFormat::PROPERTY_NAMES.contains(&name)
    }
}

impl serde::Serialize for VerificationMethod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for VerificationMethod {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::try_from_json_value(&value).map_err(serde::de::Error::custom)
    }
}
