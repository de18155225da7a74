use crate::{json_shape::json_type_name, Error, ExtensionMap, Result, URI};

/// An entry of the `service` field.  Members other than id, type, and serviceEndpoint are kept
/// verbatim in the extension bag.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Service {
    pub id: URI,
    pub r#type: String,
    pub service_endpoint: String,
    pub extension_m: ExtensionMap,
}

impl Service {
    pub const RECOGNIZED_MEMBER_NAMES: [&'static str; 3] = ["id", "type", "serviceEndpoint"];

    pub fn new(id: URI, r#type: String, service_endpoint: String) -> Self {
        Self {
            id,
            r#type,
            service_endpoint,
            extension_m: ExtensionMap::new(),
        }
    }
    pub fn try_from_json_value(value: &serde_json::Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::invalid_service(format!("expected an object, found {}", json_type_name(value)))
        })?;
        let id = match object.get("id") {
            Some(serde_json::Value::String(s)) => URI::try_from(s.as_str()),
            Some(other) => Err(Error::invalid_identifier(format!(
                "identifier must be a string, found {}",
                json_type_name(other)
            ))),
            None => Err(Error::invalid_service("missing member")),
        }
        .map_err(|e| e.within("id"))?;
        let r#type = required_string_member(object, "type")?;
        let service_endpoint = required_string_member(object, "serviceEndpoint")?;
        let extension_m = object
            .iter()
            .filter(|(name, _)| !Self::RECOGNIZED_MEMBER_NAMES.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect::<ExtensionMap>();
        if !extension_m.is_empty() {
            tracing::debug!(
                "capturing {} extension member(s) of service {}",
                extension_m.len(),
                id
            );
        }
        Ok(Self {
            id,
            r#type,
            service_endpoint,
            extension_m,
        })
    }
    /// Recognized members first, then the extension members.  Fails if an extension member
    /// would collide with a recognized one.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        let mut object = serde_json::Map::new();
        object.insert("id".into(), self.id.to_string().into());
        object.insert("type".into(), self.r#type.clone().into());
        object.insert(
            "serviceEndpoint".into(),
            self.service_endpoint.clone().into(),
        );
        self.extension_m.merge_into(
            &mut object,
            &Self::RECOGNIZED_MEMBER_NAMES,
            Error::invalid_service,
        )?;
        Ok(serde_json::Value::Object(object))
    }
}

fn required_string_member(
    object: &serde_json::Map<String, serde_json::Value>,
    name: &'static str,
) -> Result<String> {
    match object.get(name) {
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(Error::invalid_service(format!(
            "expected a string, found {}",
            json_type_name(other)
        ))
        .within(name)),
        None => Err(Error::invalid_service("missing member").within(name)),
    }
}

impl serde::Serialize for Service {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Service {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::try_from_json_value(&value).map_err(serde::de::Error::custom)
    }
}
