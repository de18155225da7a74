use crate::{json_shape::json_type_name, Error, ExtensionMap, Result};

/// The URIs of a `@context` value, remembering whether the wire form was a scalar string so that
/// re-encoding does not promote it to a one-element array.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ContextURIs {
    Single(String),
    /// Order is significant; it establishes vocabulary precedence.
    Sequence(Vec<String>),
}

/// The `@context` of a DID document.
///
/// Wire forms:
/// - `"https://www.w3.org/ns/did/v1"`: a single context URI.
/// - `["https://www.w3.org/ns/did/v1", "https://w3id.org/security/v1"]`: an ordered sequence.
/// - `["https://www.w3.org/ns/did/v1", {"@base": "did:example:123"}]`: an ordered sequence followed
///   by one object, whose members are kept verbatim in the extension bag.
///
/// A context with a non-empty extension bag is always in sequence form, since the extension
/// members are carried by a trailing array element.  The constructors maintain this.  A trailing
/// object that is present but empty (`["a", {}]`) is remembered, so it is re-emitted as such.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Context {
    uris: ContextURIs,
    extension_m: ExtensionMap,
    has_trailing_object: bool,
}

impl Context {
    pub fn single(uri: impl Into<String>) -> Self {
        Self {
            uris: ContextURIs::Single(uri.into()),
            extension_m: ExtensionMap::new(),
            has_trailing_object: false,
        }
    }
    pub fn sequence(uri_v: Vec<String>) -> Self {
        Self {
            uris: ContextURIs::Sequence(uri_v),
            extension_m: ExtensionMap::new(),
            has_trailing_object: false,
        }
    }
    /// Replaces the extension bag.  If it is non-empty, a single context is promoted to a
    /// one-element sequence.
    pub fn with_extension_m(mut self, extension_m: ExtensionMap) -> Self {
        self.has_trailing_object = !extension_m.is_empty();
        if self.has_trailing_object {
            if let ContextURIs::Single(uri) = &mut self.uris {
                let uri = std::mem::take(uri);
                self.uris = ContextURIs::Sequence(vec![uri]);
            }
        }
        self.extension_m = extension_m;
        self
    }
    pub fn uris(&self) -> &ContextURIs {
        &self.uris
    }
    /// The context URIs in order, regardless of wire form.
    pub fn uri_v(&self) -> &[String] {
        match &self.uris {
            ContextURIs::Single(uri) => std::slice::from_ref(uri),
            ContextURIs::Sequence(uri_v) => uri_v.as_slice(),
        }
    }
    pub fn is_single(&self) -> bool {
        matches!(self.uris, ContextURIs::Single(_))
    }
    pub fn extension_m(&self) -> &ExtensionMap {
        &self.extension_m
    }
    /// True iff the wire form ends in an object, which may be empty.
    pub fn has_trailing_object(&self) -> bool {
        self.has_trailing_object
    }
    pub fn try_from_json_value(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(uri) => Ok(Self::single(uri.clone())),
            serde_json::Value::Array(element_v) => {
                let mut uri_v = Vec::with_capacity(element_v.len());
                let mut extension_m = ExtensionMap::new();
                let mut has_trailing_object = false;
                for (index, element) in element_v.iter().enumerate() {
                    match element {
                        serde_json::Value::String(uri) => uri_v.push(uri.clone()),
                        serde_json::Value::Object(object) if index + 1 == element_v.len() => {
                            tracing::debug!(
                                "capturing {} @context extension member(s)",
                                object.len()
                            );
                            extension_m = object.clone().into();
                            has_trailing_object = true;
                        }
                        serde_json::Value::Object(_) => {
                            return Err(Error::invalid_context(
                                "an object is only allowed as the last element",
                            )
                            .within_index(index));
                        }
                        other => {
                            return Err(Error::invalid_context(format!(
                                "expected a string, found {}",
                                json_type_name(other)
                            ))
                            .within_index(index));
                        }
                    }
                }
                Ok(Self {
                    uris: ContextURIs::Sequence(uri_v),
                    extension_m,
                    has_trailing_object,
                })
            }
            other => Err(Error::invalid_context(format!(
                "expected a string or an array of strings, found {}",
                json_type_name(other)
            ))),
        }
    }
    pub fn to_json_value(&self) -> serde_json::Value {
        match (&self.uris, self.has_trailing_object) {
            (ContextURIs::Single(uri), false) => serde_json::Value::String(uri.clone()),
            _ => {
                let mut element_v = self
                    .uri_v()
                    .iter()
                    .cloned()
                    .map(serde_json::Value::String)
                    .collect::<Vec<_>>();
                if self.has_trailing_object {
                    element_v.push(serde_json::Value::Object(
                        self.extension_m.as_map().clone(),
                    ));
                }
                serde_json::Value::Array(element_v)
            }
        }
    }
}

impl From<&str> for Context {
    fn from(uri: &str) -> Self {
        Self::single(uri)
    }
}

impl From<Vec<String>> for Context {
    fn from(uri_v: Vec<String>) -> Self {
        Self::sequence(uri_v)
    }
}

impl serde::Serialize for Context {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Context {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::try_from_json_value(&value).map_err(serde::de::Error::custom)
    }
}
