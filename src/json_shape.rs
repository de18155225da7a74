//! Structural classification of raw JSON values.  The DID document wire format has no type tags
//! for its polymorphic fields, so each codec first decides which of the legal shapes a value has,
//! and then decodes according to that shape.  Classification is pure and never looks at the
//! content of strings.

use serde_json::{Map, Value};

/// The member names of a JWK-style key object that this model recognizes.
pub const KEY_OBJECT_MEMBER_NAMES: [&str; 5] = ["crv", "kid", "kty", "x", "y"];

/// Either a single string or an array whose every element is a string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StringOrArrayShape<'a> {
    String(&'a str),
    Array(Vec<&'a str>),
}

impl<'a> StringOrArrayShape<'a> {
    pub fn classify(value: &'a Value) -> Result<Self, &'static str> {
        match value {
            Value::String(s) => Ok(Self::String(s.as_str())),
            Value::Array(element_v) => element_v
                .iter()
                .map(|element| element.as_str().ok_or("array element is not a string"))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Array),
            _ => Err("expected a string or an array of strings"),
        }
    }
}

/// Either a string (a reference) or a JSON object (an embedded entity).
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectOrStringShape<'a> {
    String(&'a str),
    Object(&'a Map<String, Value>),
}

impl<'a> ObjectOrStringShape<'a> {
    pub fn classify(value: &'a Value) -> Result<Self, &'static str> {
        match value {
            Value::String(s) => Ok(Self::String(s.as_str())),
            Value::Object(object) => Ok(Self::Object(object)),
            _ => Err("expected a string or an object"),
        }
    }
}

/// The shape of a key value.  A string's concrete encoding (hex, base58, PEM) cannot be recovered
/// from the string itself, so it is reported generically; the caller supplies the encoding.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyShape<'a> {
    String(&'a str),
    KeyObject(&'a Map<String, Value>),
}

impl<'a> KeyShape<'a> {
    /// An object qualifies as a key object iff it has at least one of [`KEY_OBJECT_MEMBER_NAMES`].
    pub fn classify(value: &'a Value) -> Result<Self, &'static str> {
        match value {
            Value::String(s) => Ok(Self::String(s.as_str())),
            Value::Object(object) => {
                if KEY_OBJECT_MEMBER_NAMES
                    .iter()
                    .any(|name| object.contains_key(*name))
                {
                    Ok(Self::KeyObject(object))
                } else {
                    Err("key object has none of the members crv, kid, kty, x, y")
                }
            }
            _ => Err("expected a string or a key object"),
        }
    }
}

/// Name of the JSON type of a value, for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
