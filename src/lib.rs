mod context;
mod controller;
mod did_document;
mod error;
mod extension_map;
pub mod json_shape;
mod key_format;
mod key_purpose;
pub mod key_types;
mod public_key_jwk;
mod serialization_format;
mod service;
mod string_key_encoding;
mod uri;
mod verification_method;
mod verification_relationship;

pub use crate::{
    context::{Context, ContextURIs},
    controller::Controller,
    did_document::{DIDDocument, DID_V1_CONTEXT},
    error::{Error, ErrorKind},
    extension_map::{hash_json_value, ExtensionMap},
    key_format::KeyFormat,
    key_purpose::KeyPurpose,
    public_key_jwk::PublicKeyJWK,
    serialization_format::SerializationFormat,
    service::Service,
    string_key_encoding::StringKeyEncoding,
    uri::URI,
    verification_method::VerificationMethod,
    verification_relationship::VerificationRelationship,
};

pub type Result<T> = std::result::Result<T, Error>;

/// Parses the bytes of a JSON DID document.  Equivalent to [`DIDDocument::parse`].
pub fn parse(bytes: &[u8]) -> Result<DIDDocument> {
    DIDDocument::parse(bytes)
}

/// Serializes a DID document as compact JSON.  Equivalent to [`DIDDocument::serialize`].
pub fn serialize(did_document: &DIDDocument) -> Result<Vec<u8>> {
    did_document.serialize()
}
