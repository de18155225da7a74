use crate::{
    json_shape::{json_type_name, ObjectOrStringShape},
    Error, Result, VerificationMethod,
};

/// One entry of a verification relationship field (`authentication`, `assertionMethod`,
/// `keyAgreement`, `capabilityDelegation`, `capabilityInvocation`).  On the wire this is either a
/// bare string referencing a verification method by id, or an embedded verification method object.
///
/// The reference is kept verbatim (a leading `#` is not rewritten) and is not resolved; use
/// [`crate::DIDDocument::resolve_relationship`] to look it up among the document's verification
/// methods.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum VerificationRelationship {
    Reference(String),
    Embedded(VerificationMethod),
}

impl VerificationRelationship {
    /// The id of the embedded verification method, or the reference string.
    pub fn effective_id(&self) -> &str {
        match self {
            Self::Reference(reference) => reference.as_str(),
            Self::Embedded(verification_method) => verification_method.id.as_str(),
        }
    }
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }
    pub fn as_reference_o(&self) -> Option<&str> {
        match self {
            Self::Reference(reference) => Some(reference.as_str()),
            Self::Embedded(_) => None,
        }
    }
    pub fn as_embedded_o(&self) -> Option<&VerificationMethod> {
        match self {
            Self::Reference(_) => None,
            Self::Embedded(verification_method) => Some(verification_method),
        }
    }
    pub fn try_from_json_value(value: &serde_json::Value) -> Result<Self> {
        match ObjectOrStringShape::classify(value).map_err(|reason| {
            Error::invalid_verification_relationship(format!(
                "{}, found {}",
                reason,
                json_type_name(value)
            ))
        })? {
            ObjectOrStringShape::String(reference) => {
                if reference.is_empty() {
                    return Err(Error::invalid_verification_relationship(
                        "reference must not be empty",
                    ));
                }
                Ok(Self::Reference(reference.to_string()))
            }
            ObjectOrStringShape::Object(object) => {
                Ok(Self::Embedded(VerificationMethod::decode(object)?))
            }
        }
    }
    /// Inverse of [`VerificationRelationship::try_from_json_value`].  Fails on an empty
    /// reference or on an embedded method that can't be encoded.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        match self {
            Self::Reference(reference) => {
                if reference.is_empty() {
                    return Err(Error::invalid_verification_relationship(
                        "reference must not be empty",
                    ));
                }
                Ok(serde_json::Value::String(reference.clone()))
            }
            Self::Embedded(verification_method) => verification_method.to_json_value(),
        }
    }
}

impl From<VerificationMethod> for VerificationRelationship {
    fn from(verification_method: VerificationMethod) -> Self {
        Self::Embedded(verification_method)
    }
}

impl serde::Serialize for VerificationRelationship {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for VerificationRelationship {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::try_from_json_value(&value).map_err(serde::de::Error::custom)
    }
}
