use std::hash::{Hash, Hasher};

use crate::{Error, Result};

/// Ordered bag of JSON object members that the typed model does not recognize.  Members are kept
/// verbatim (unparsed) and in their original order, and are emitted after the recognized fields
/// when the owning entity is serialized.
///
/// Equality is that of `serde_json::Map`, i.e. it compares members by name and ignores their
/// order.  Hashing is consistent with that.
#[derive(
    Clone,
    Debug,
    Default,
    derive_more::Deref,
    derive_more::DerefMut,
    Eq,
    derive_more::From,
    derive_more::Into,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(transparent)]
pub struct ExtensionMap(serde_json::Map<String, serde_json::Value>);

impl ExtensionMap {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn as_map(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.0
    }
    pub fn into_map(self) -> serde_json::Map<String, serde_json::Value> {
        self.0
    }
    /// Copies every member of `self` into `object`, after whatever `object` already contains.
    /// Fails if a member's name is one of `recognized_names` or already exists in `object`,
    /// since emitting it would shadow (or be shadowed by) a recognized field.
    pub(crate) fn merge_into(
        &self,
        object: &mut serde_json::Map<String, serde_json::Value>,
        recognized_names: &[&str],
        collision: impl Fn(String) -> Error,
    ) -> Result<()> {
        for (name, value) in self.0.iter() {
            if recognized_names.contains(&name.as_str()) || object.contains_key(name) {
                return Err(collision(format!(
                    "extension member {:?} collides with a recognized field",
                    name
                ))
                .within(name));
            }
            object.insert(name.clone(), value.clone());
        }
        Ok(())
    }
}

impl FromIterator<(String, serde_json::Value)> for ExtensionMap {
    fn from_iter<I: IntoIterator<Item = (String, serde_json::Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Hash for ExtensionMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_json_object(&self.0, state);
    }
}

/// Structural hash of a raw JSON value, consistent with `serde_json::Value`'s `Eq`: arrays are
/// hashed in order, object members in name order (object equality ignores member order).
pub fn hash_json_value<H: Hasher>(value: &serde_json::Value, state: &mut H) {
    use serde_json::Value;
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        Value::Number(n) => {
            2u8.hash(state);
            // Equal Numbers have the same internal representation and hence the same text.
            n.to_string().hash(state);
        }
        Value::String(s) => {
            3u8.hash(state);
            s.hash(state);
        }
        Value::Array(element_v) => {
            4u8.hash(state);
            element_v.len().hash(state);
            for element in element_v {
                hash_json_value(element, state);
            }
        }
        Value::Object(object) => {
            5u8.hash(state);
            hash_json_object(object, state);
        }
    }
}

fn hash_json_object<H: Hasher>(
    object: &serde_json::Map<String, serde_json::Value>,
    state: &mut H,
) {
    let mut member_v = object.iter().collect::<Vec<_>>();
    member_v.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
    member_v.len().hash(state);
    for (name, value) in member_v {
        name.hash(state);
        hash_json_value(value, state);
    }
}
