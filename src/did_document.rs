use std::hash::{Hash, Hasher};

use crate::{
    json_shape::json_type_name, Context, Controller, Error, ExtensionMap, KeyPurpose, Result,
    SerializationFormat, Service, VerificationMethod, VerificationRelationship, URI,
};

/// The generic data model for DID documents (<https://www.w3.org/TR/did-core/>).
///
/// Each recognized top-level field is an `Option<Option<T>>` so that the three wire states survive
/// a decode-then-encode cycle: `None` means the member was absent, `Some(None)` means it was JSON
/// `null`, and `Some(Some(value))` means it was present (an array field may be present and empty).
/// The accessor methods (e.g. [`DIDDocument::verification_method_v`]) flatten these for callers
/// who don't care about the distinction.
///
/// Members that are not recognized are kept verbatim, in order, in `extension_m`, and are emitted
/// after the recognized fields.
///
/// To parse, use [`DIDDocument::parse`] or `serde_json::from_str::<DIDDocument>(s)`; to emit, use
/// [`DIDDocument::serialize`], [`DIDDocument::serialize_with`], or any serde serializer.  Both
/// routes go through the same codec.
///
/// Equality is structural and order-sensitive for every sequence.  Two documents whose
/// verification methods are listed in a different order are not equal.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DIDDocument {
    pub context_oo: Option<Option<Context>>,
    pub id_oo: Option<Option<URI>>,
    pub controller_oo: Option<Option<Controller>>,
    pub verification_method_voo: Option<Option<Vec<VerificationMethod>>>,
    pub authentication_voo: Option<Option<Vec<VerificationRelationship>>>,
    pub assertion_method_voo: Option<Option<Vec<VerificationRelationship>>>,
    pub key_agreement_voo: Option<Option<Vec<VerificationRelationship>>>,
    pub capability_delegation_voo: Option<Option<Vec<VerificationRelationship>>>,
    pub capability_invocation_voo: Option<Option<Vec<VerificationRelationship>>>,
    pub service_voo: Option<Option<Vec<Service>>>,
    /// Never contains a member whose name is in [`DIDDocument::RECOGNIZED_FIELD_NAMES`].
    pub extension_m: ExtensionMap,
}

/// The base context of DID core documents.
pub const DID_V1_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

impl DIDDocument {
    /// The recognized fields, in the order they are emitted.
    pub const RECOGNIZED_FIELD_NAMES: [&'static str; 10] = [
        "@context",
        "id",
        "controller",
        "verificationMethod",
        "authentication",
        "assertionMethod",
        "keyAgreement",
        "capabilityDelegation",
        "capabilityInvocation",
        "service",
    ];

    /// Minimal document with the DID core v1 context and the given id.
    pub fn new(id: URI) -> Self {
        Self {
            context_oo: Some(Some(Context::single(DID_V1_CONTEXT))),
            id_oo: Some(Some(id)),
            ..Default::default()
        }
    }

    //
    // Codec entry points
    //

    /// Parses the bytes of a JSON DID document.  Decoding is all-or-nothing: the first field that
    /// fails its shape rules aborts the parse, and the error names that field's path.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let value = serde_json::from_slice::<serde_json::Value>(bytes).map_err(|e| {
            tracing::debug!("DID document is not valid JSON: {}", e);
            Error::MalformedDocument(format!("not valid JSON: {}", e).into())
        })?;
        Self::try_from_json_value(&value)
    }
    /// Serializes this DID document as compact JSON.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        self.serialize_with(SerializationFormat::Compact)
    }
    /// Fails without emitting anything if some part of this document could not be read back by
    /// [`DIDDocument::parse`] (e.g. an empty string key, an empty reference, or an extension member
    /// named like a recognized field).
    pub fn serialize_with(&self, format: SerializationFormat) -> Result<Vec<u8>> {
        let value = self.to_json_value()?;
        match format {
            SerializationFormat::Compact => Ok(serde_json::to_vec(&value)?),
            SerializationFormat::Pretty => Ok(serde_json::to_vec_pretty(&value)?),
            SerializationFormat::Canonical => serde_json_canonicalizer::to_vec(&value)
                .map_err(|_| {
                    Error::Serialization(
                        "Failed to serialize DID document to canonical JSON (into Vec<u8>)".into(),
                    )
                }),
        }
    }
    /// This method is what you should use if you want to canonically serialize this DID document
    /// (to a String), e.g. for hashing or signing.  JCS (RFC 8785) is used for canonicalization.
    /// Note that JCS sorts object members, so this does not preserve emission order.
    pub fn serialize_canonically(&self) -> Result<String> {
        let did_document_jcs_bytes = self.serialize_with(SerializationFormat::Canonical)?;
        Ok(String::from_utf8(did_document_jcs_bytes).expect("this should not be possible"))
    }
    /// Canonically serializes this DID document into a std::io::Write.  See also
    /// serialize_canonically.
    pub fn serialize_canonically_to_writer<W: std::io::Write>(&self, write: &mut W) -> Result<()> {
        serde_json_canonicalizer::to_writer(&self.to_json_value()?, write).map_err(|_| {
            Error::Serialization(
                "Failed to serialize DID document to canonical JSON (into std::io::Write)".into(),
            )
        })
    }

    //
    // Value-level codec
    //

    pub fn try_from_json_value(value: &serde_json::Value) -> Result<Self> {
        tracing::trace!("DIDDocument::try_from_json_value");
        let object = value.as_object().ok_or_else(|| {
            Error::MalformedDocument(
                format!(
                    "expected a JSON object, found {}",
                    json_type_name(value)
                )
                .into(),
            )
        })?;
        Self::decode(object).map_err(|e| {
            tracing::debug!("DID document decode failed: {}", e);
            e
        })
    }
    fn decode(object: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let context_oo = decode_field(object, "@context", Context::try_from_json_value)?;
        let id_oo = decode_field(object, "id", decode_id)?;
        let controller_oo = decode_field(object, "controller", Controller::try_from_json_value)?;
        let verification_method_voo = decode_field(object, "verificationMethod", |value| {
            decode_array(
                value,
                VerificationMethod::try_from_json_value,
                Error::invalid_verification_method,
            )
        })?;
        let authentication_voo = decode_relationships(object, KeyPurpose::Authentication)?;
        let assertion_method_voo = decode_relationships(object, KeyPurpose::AssertionMethod)?;
        let key_agreement_voo = decode_relationships(object, KeyPurpose::KeyAgreement)?;
        let capability_delegation_voo =
            decode_relationships(object, KeyPurpose::CapabilityDelegation)?;
        let capability_invocation_voo =
            decode_relationships(object, KeyPurpose::CapabilityInvocation)?;
        let service_voo = decode_field(object, "service", |value| {
            decode_array(value, Service::try_from_json_value, Error::invalid_service)
        })?;

        let extension_m = object
            .iter()
            .filter(|(name, _)| !Self::RECOGNIZED_FIELD_NAMES.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect::<ExtensionMap>();
        if !extension_m.is_empty() {
            tracing::debug!(
                "capturing {} DID document extension member(s): {:?}",
                extension_m.len(),
                extension_m.keys().collect::<Vec<_>>()
            );
        }

        Ok(Self {
            context_oo,
            id_oo,
            controller_oo,
            verification_method_voo,
            authentication_voo,
            assertion_method_voo,
            key_agreement_voo,
            capability_delegation_voo,
            capability_invocation_voo,
            service_voo,
            extension_m,
        })
    }
    /// Inverse of [`DIDDocument::try_from_json_value`].  Recognized fields are emitted in the order
    /// of [`DIDDocument::RECOGNIZED_FIELD_NAMES`], followed by the extension members in their stored
    /// order.  Absent fields are omitted; null fields are emitted as null.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        tracing::trace!("DIDDocument::to_json_value");
        self.encode().map_err(|e| {
            tracing::debug!("DID document encode failed: {}", e);
            e
        })
    }
    fn encode(&self) -> Result<serde_json::Value> {
        let mut object = serde_json::Map::new();
        encode_field(&mut object, "@context", &self.context_oo, |context| {
            Ok(context.to_json_value())
        })?;
        encode_field(&mut object, "id", &self.id_oo, |id| {
            Ok(serde_json::Value::String(id.to_string()))
        })?;
        encode_field(&mut object, "controller", &self.controller_oo, |controller| {
            Ok(controller.to_json_value())
        })?;
        encode_field(
            &mut object,
            "verificationMethod",
            &self.verification_method_voo,
            |verification_method_v| {
                encode_array(verification_method_v, VerificationMethod::to_json_value)
            },
        )?;
        for key_purpose in KeyPurpose::VARIANTS {
            encode_field(
                &mut object,
                key_purpose.as_str(),
                self.relationships_voo(key_purpose),
                |relationship_v| {
                    encode_array(relationship_v, VerificationRelationship::to_json_value)
                },
            )?;
        }
        encode_field(&mut object, "service", &self.service_voo, |service_v| {
            encode_array(service_v, Service::to_json_value)
        })?;
        self.extension_m.merge_into(
            &mut object,
            &Self::RECOGNIZED_FIELD_NAMES,
            |reason| Error::Serialization(reason.into()),
        )?;
        Ok(serde_json::Value::Object(object))
    }

    //
    // Accessors
    //

    pub fn context_o(&self) -> Option<&Context> {
        self.context_oo.as_ref().and_then(Option::as_ref)
    }
    pub fn id_o(&self) -> Option<&URI> {
        self.id_oo.as_ref().and_then(Option::as_ref)
    }
    pub fn controller_o(&self) -> Option<&Controller> {
        self.controller_oo.as_ref().and_then(Option::as_ref)
    }
    pub fn verification_method_v(&self) -> &[VerificationMethod] {
        flatten_slice(&self.verification_method_voo)
    }
    pub fn service_v(&self) -> &[Service] {
        flatten_slice(&self.service_voo)
    }
    /// The raw (three-state) field for the given verification relationship.
    pub fn relationships_voo(
        &self,
        key_purpose: KeyPurpose,
    ) -> &Option<Option<Vec<VerificationRelationship>>> {
        match key_purpose {
            KeyPurpose::Authentication => &self.authentication_voo,
            KeyPurpose::AssertionMethod => &self.assertion_method_voo,
            KeyPurpose::KeyAgreement => &self.key_agreement_voo,
            KeyPurpose::CapabilityDelegation => &self.capability_delegation_voo,
            KeyPurpose::CapabilityInvocation => &self.capability_invocation_voo,
        }
    }
    pub fn relationships_voo_mut(
        &mut self,
        key_purpose: KeyPurpose,
    ) -> &mut Option<Option<Vec<VerificationRelationship>>> {
        match key_purpose {
            KeyPurpose::Authentication => &mut self.authentication_voo,
            KeyPurpose::AssertionMethod => &mut self.assertion_method_voo,
            KeyPurpose::KeyAgreement => &mut self.key_agreement_voo,
            KeyPurpose::CapabilityDelegation => &mut self.capability_delegation_voo,
            KeyPurpose::CapabilityInvocation => &mut self.capability_invocation_voo,
        }
    }
    /// Returns the entries of the "authentication", "assertionMethod", "keyAgreement",
    /// "capabilityDelegation", or "capabilityInvocation" field; empty if absent or null.
    pub fn relationships(&self, key_purpose: KeyPurpose) -> &[VerificationRelationship] {
        flatten_slice(self.relationships_voo(key_purpose))
    }

    //
    // Lookups (performed on behalf of callers; the codec itself never resolves references)
    //

    /// Finds a verification method by id, among the `verificationMethod` entries and then among
    /// the methods embedded in the verification relationships.  A fragment-only id (`#key-1`) and
    /// the absolute form (`<document id>#key-1`) are considered to match each other.
    pub fn verification_method_for_id(&self, id: &str) -> Option<&VerificationMethod> {
        let embedded_i = KeyPurpose::VARIANTS
            .into_iter()
            .flat_map(|key_purpose| self.relationships(key_purpose).iter())
            .filter_map(VerificationRelationship::as_embedded_o);
        self.verification_method_v()
            .iter()
            .chain(embedded_i)
            .find(|verification_method| self.ids_match(verification_method.id.as_str(), id))
    }
    /// Produces the verification method a relationship entry designates: the embedded method
    /// itself, or the method its reference points to (None if there is no such method).
    pub fn resolve_relationship<'a>(
        &'a self,
        relationship: &'a VerificationRelationship,
    ) -> Option<&'a VerificationMethod> {
        match relationship {
            VerificationRelationship::Embedded(verification_method) => Some(verification_method),
            VerificationRelationship::Reference(reference) => {
                self.verification_method_for_id(reference.as_str())
            }
        }
    }
    /// Returns all the KeyPurposes whose field lists (by reference or embedded) the verification
    /// method with the given id, in KeyPurpose order.
    pub fn key_purposes_for_id(&self, id: &str) -> Vec<KeyPurpose> {
        KeyPurpose::VARIANTS
            .into_iter()
            .filter(|key_purpose| {
                self.relationships(*key_purpose)
                    .iter()
                    .any(|relationship| self.ids_match(relationship.effective_id(), id))
            })
            .collect()
    }
    fn ids_match(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        let document_id = match self.id_o() {
            Some(document_id) => document_id.as_str(),
            None => return false,
        };
        let qualified = |s: &str| -> Option<String> {
            s.starts_with('#').then(|| format!("{}{}", document_id, s))
        };
        qualified(a).as_deref() == Some(b) || qualified(b).as_deref() == Some(a)
    }
}

impl Hash for DIDDocument {
    /// Consistent with Eq.  Absent fields contribute nothing; present fields (including null ones)
    /// contribute their field name and value.
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_field(state, "@context", &self.context_oo);
        hash_field(state, "id", &self.id_oo);
        hash_field(state, "controller", &self.controller_oo);
        hash_field(state, "verificationMethod", &self.verification_method_voo);
        for key_purpose in KeyPurpose::VARIANTS {
            hash_field(state, key_purpose.as_str(), self.relationships_voo(key_purpose));
        }
        hash_field(state, "service", &self.service_voo);
        if !self.extension_m.is_empty() {
            self.extension_m.hash(state);
        }
    }
}

impl TryFrom<&serde_json::Value> for DIDDocument {
    type Error = Error;
    fn try_from(value: &serde_json::Value) -> Result<Self> {
        Self::try_from_json_value(value)
    }
}

impl TryFrom<&DIDDocument> for serde_json::Value {
    type Error = Error;
    fn try_from(did_document: &DIDDocument) -> Result<Self> {
        did_document.to_json_value()
    }
}

impl std::str::FromStr for DIDDocument {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}

impl serde::Serialize for DIDDocument {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for DIDDocument {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::try_from_json_value(&value).map_err(serde::de::Error::custom)
    }
}

fn decode_id(value: &serde_json::Value) -> Result<URI> {
    match value {
        serde_json::Value::String(s) => URI::try_from(s.as_str()),
        other => Err(Error::invalid_identifier(format!(
            "identifier must be a string, found {}",
            json_type_name(other)
        ))),
    }
}

/// The relationship kind is attached here, from the field name; it is never inferred from content.
fn decode_relationships(
    object: &serde_json::Map<String, serde_json::Value>,
    key_purpose: KeyPurpose,
) -> Result<Option<Option<Vec<VerificationRelationship>>>> {
    decode_field(object, key_purpose.as_str(), |value| {
        decode_array(
            value,
            VerificationRelationship::try_from_json_value,
            Error::invalid_verification_relationship,
        )
    })
}

fn decode_field<T>(
    object: &serde_json::Map<String, serde_json::Value>,
    name: &str,
    decode: impl FnOnce(&serde_json::Value) -> Result<T>,
) -> Result<Option<Option<T>>> {
    match object.get(name) {
        None => Ok(None),
        Some(serde_json::Value::Null) => Ok(Some(None)),
        Some(value) => decode(value)
            .map(|t| Some(Some(t)))
            .map_err(|e| e.within(name)),
    }
}

fn decode_array<T>(
    value: &serde_json::Value,
    decode_element: impl Fn(&serde_json::Value) -> Result<T>,
    not_an_array: fn(String) -> Error,
) -> Result<Vec<T>> {
    let element_v = value.as_array().ok_or_else(|| {
        not_an_array(format!(
            "expected an array, found {}",
            json_type_name(value)
        ))
    })?;
    element_v
        .iter()
        .enumerate()
        .map(|(index, element)| decode_element(element).map_err(|e| e.within_index(index)))
        .collect()
}

fn encode_field<T>(
    object: &mut serde_json::Map<String, serde_json::Value>,
    name: &str,
    field_oo: &Option<Option<T>>,
    encode: impl FnOnce(&T) -> Result<serde_json::Value>,
) -> Result<()> {
    match field_oo {
        None => {}
        Some(None) => {
            object.insert(name.to_string(), serde_json::Value::Null);
        }
        Some(Some(t)) => {
            let value = encode(t).map_err(|e| e.within(name))?;
            object.insert(name.to_string(), value);
        }
    }
    Ok(())
}

fn encode_array<T>(
    t_v: &[T],
    encode_element: impl Fn(&T) -> Result<serde_json::Value>,
) -> Result<serde_json::Value> {
    t_v.iter()
        .enumerate()
        .map(|(index, t)| encode_element(t).map_err(|e| e.within_index(index)))
        .collect::<Result<Vec<_>>>()
        .map(serde_json::Value::Array)
}

fn flatten_slice<T>(field_voo: &Option<Option<Vec<T>>>) -> &[T] {
    match field_voo {
        Some(Some(t_v)) => t_v.as_slice(),
        _ => &[],
    }
}

fn hash_field<T: Hash, H: Hasher>(state: &mut H, name: &str, field_oo: &Option<Option<T>>) {
    if let Some(field_o) = field_oo {
        name.hash(state);
        field_o.hash(state);
    }
}
