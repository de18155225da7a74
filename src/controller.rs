use crate::{
    json_shape::{json_type_name, StringOrArrayShape},
    Error, Result, URI,
};

/// The `controller` field of a DID document: one identifier, or an ordered set of them.  The wire
/// shape is kept so that a single string is re-emitted as a single string.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Controller {
    Single(URI),
    Set(Vec<URI>),
}

impl Controller {
    /// The controller identifiers in order, regardless of wire form.
    pub fn as_slice(&self) -> &[URI] {
        match self {
            Self::Single(uri) => std::slice::from_ref(uri),
            Self::Set(uri_v) => uri_v.as_slice(),
        }
    }
    pub fn contains(&self, uri: &str) -> bool {
        self.as_slice().iter().any(|controller| controller.as_str() == uri)
    }
    pub fn try_from_json_value(value: &serde_json::Value) -> Result<Self> {
        let shape = StringOrArrayShape::classify(value).map_err(|reason| {
            Error::invalid_controller(format!("{}, found {}", reason, json_type_name(value)))
        })?;
        match shape {
            StringOrArrayShape::String(s) => Ok(Self::Single(URI::try_from(s)?)),
            StringOrArrayShape::Array(s_v) => s_v
                .into_iter()
                .enumerate()
                .map(|(index, s)| URI::try_from(s).map_err(|e| e.within_index(index)))
                .collect::<Result<Vec<_>>>()
                .map(Self::Set),
        }
    }
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Self::Single(uri) => serde_json::Value::String(uri.to_string()),
            Self::Set(uri_v) => serde_json::Value::Array(
                uri_v
                    .iter()
                    .map(|uri| serde_json::Value::String(uri.to_string()))
                    .collect(),
            ),
        }
    }
}

impl From<URI> for Controller {
    fn from(uri: URI) -> Self {
        Self::Single(uri)
    }
}

impl From<Vec<URI>> for Controller {
    fn from(uri_v: Vec<URI>) -> Self {
        Self::Set(uri_v)
    }
}

impl serde::Serialize for Controller {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Controller {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::try_from_json_value(&value).map_err(serde::de::Error::custom)
    }
}
