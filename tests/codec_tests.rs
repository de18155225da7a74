use did_document::{
    json_shape::{KeyShape, ObjectOrStringShape, StringOrArrayShape},
    key_types, Context, ContextURIs, Controller, ErrorKind, KeyFormat, KeyPurpose, PublicKeyJWK,
    Service, StringKeyEncoding, VerificationMethod, VerificationRelationship, URI,
};

/// This will run once at load time (i.e. presumably before main function is called).
#[ctor::ctor]
fn overall_init() {
    // It's necessary to specify EnvFilter::from_default_env in order to use RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_target(true)
        .with_line_number(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .init();
}

#[test]
fn test_shape_classification() {
    let value = serde_json::json!("did:example:1");
    assert_eq!(
        StringOrArrayShape::classify(&value).expect("pass"),
        StringOrArrayShape::String("did:example:1")
    );
    let value = serde_json::json!(["a", "b"]);
    assert_eq!(
        StringOrArrayShape::classify(&value).expect("pass"),
        StringOrArrayShape::Array(vec!["a", "b"])
    );
    let value = serde_json::json!([]);
    assert_eq!(
        StringOrArrayShape::classify(&value).expect("pass"),
        StringOrArrayShape::Array(vec![])
    );
    for value in [
        serde_json::json!(["a", 1]),
        serde_json::json!({}),
        serde_json::json!(null),
        serde_json::json!(true),
    ] {
        StringOrArrayShape::classify(&value).expect_err("pass");
    }

    let value = serde_json::json!("#key-1");
    assert_eq!(
        ObjectOrStringShape::classify(&value).expect("pass"),
        ObjectOrStringShape::String("#key-1")
    );
    let value = serde_json::json!({ "id": "#key-1" });
    assert!(matches!(
        ObjectOrStringShape::classify(&value).expect("pass"),
        ObjectOrStringShape::Object(_)
    ));
    ObjectOrStringShape::classify(&serde_json::json!(["#key-1"])).expect_err("pass");

    let value = serde_json::json!("z6Mk");
    assert_eq!(KeyShape::classify(&value).expect("pass"), KeyShape::String("z6Mk"));
    let value = serde_json::json!({ "kty": "OKP", "use": "sig" });
    assert!(matches!(
        KeyShape::classify(&value).expect("pass"),
        KeyShape::KeyObject(_)
    ));
    // An object with none of the key object members is not a key object.
    KeyShape::classify(&serde_json::json!({ "use": "sig" })).expect_err("pass");
    KeyShape::classify(&serde_json::json!({})).expect_err("pass");
    KeyShape::classify(&serde_json::json!(17)).expect_err("pass");
}

#[test]
fn test_uri() {
    for s in [
        "did:example:123456789abcdefghi",
        "did:example:123#keys-1",
        "did:web:example.com%3A3000:user:alice",
        "https://www.w3.org/ns/did/v1",
        "#keys-1",
        "?service=files",
        "/path/to/thing",
    ] {
        let uri = URI::try_from(s).expect("pass");
        assert_eq!(uri.as_str(), s);
        assert_eq!(uri.to_string(), s);
    }
    assert!(URI::try_from("#keys-1").expect("pass").is_relative());
    assert!(!URI::try_from("did:example:1").expect("pass").is_relative());
    assert_eq!(
        URI::try_from("did:example:1#keys-1").expect("pass").fragment_o(),
        Some("keys-1")
    );
    assert_eq!(URI::try_from("did:example:1").expect("pass").fragment_o(), None);

    for s in [
        "",
        " ",
        "did:example:a b",
        "did:example:1\n",
        "http://[::1",
        "<x>",
        "a\"b",
        "%zz",
        "did:example:abc%4",
        "1abc:foo",
        "did:example:{bad}",
        "did:example:caf\u{e9}",
        "#key|1",
    ] {
        let error = URI::try_from(s).expect_err("pass");
        println!("expected error: {}", error);
        assert_eq!(error.kind(), ErrorKind::InvalidIdentifier);
    }

    // serde goes through FromStr and Display.
    let uri = serde_json::from_str::<URI>("\"did:example:1\"").expect("pass");
    assert_eq!(serde_json::to_string(&uri).expect("pass"), "\"did:example:1\"");
    serde_json::from_str::<URI>("\"\"").expect_err("pass");
}

#[test]
fn test_key_format_string_encodings() {
    for (encoding, property_name) in [
        (StringKeyEncoding::Hex, "publicKeyHex"),
        (StringKeyEncoding::Base58, "publicKeyBase58"),
        (StringKeyEncoding::PEM, "publicKeyPem"),
    ] {
        assert_eq!(encoding.property_name(), property_name);
        assert_eq!(StringKeyEncoding::from_property_name(property_name), Some(encoding));
        assert_eq!(
            encoding.as_str().parse::<StringKeyEncoding>().expect("pass"),
            encoding
        );

        let key_format =
            KeyFormat::decode(&serde_json::json!("abc123"), Some(encoding)).expect("pass");
        assert_eq!(key_format.string_encoding_o(), Some(encoding));
        assert_eq!(key_format.property_name(), property_name);
        assert_eq!(key_format.as_str_o(), Some("abc123"));
        assert_eq!(
            key_format.to_json_value().expect("pass"),
            serde_json::json!("abc123")
        );
    }
    assert_eq!(StringKeyEncoding::from_property_name("publicKeyJwk"), None);

    let error = KeyFormat::decode(&serde_json::json!(""), Some(StringKeyEncoding::Hex))
        .expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::InvalidKeyEncoding);
    // A bare string is only legal where the property names its encoding.
    let error = KeyFormat::decode(&serde_json::json!("abc123"), None).expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::InvalidKeyEncoding);
    let error = KeyFormat::decode(&serde_json::json!(42), Some(StringKeyEncoding::Base58))
        .expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::InvalidKeyEncoding);
}

#[test]
fn test_key_format_jwk() {
    let value = serde_json::json!({
        "kty": "OKP",
        "crv": "Ed25519",
        "x": "11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo",
        "use": "sig"
    });
    let key_format = KeyFormat::decode(&value, None).expect("pass");
    let expected = PublicKeyJWK::okp(
        "Ed25519".into(),
        "11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo".into(),
    );
    assert_eq!(key_format, KeyFormat::from(expected.clone()));
    assert_eq!(key_format.property_name(), "publicKeyJwk");
    assert_eq!(key_format.as_jwk_o(), Some(&expected));
    // Only the recognized members survive, in canonical member order.
    assert_eq!(
        serde_json::to_string(&key_format.to_json_value().expect("pass")).expect("pass"),
        r#"{"crv":"Ed25519","kty":"OKP","x":"11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo"}"#
    );
    // PublicKeyJWK's own serde form omits absent members too.
    assert_eq!(
        serde_json::to_value(&expected).expect("pass"),
        key_format.to_json_value().expect("pass")
    );

    for bad_value in [
        serde_json::json!({ "foo": "bar" }),
        serde_json::json!({ "kty": 7 }),
        serde_json::json!({ "kty": null }),
    ] {
        let error = KeyFormat::decode(&bad_value, None).expect_err("pass");
        println!("expected error: {}", error);
        assert_eq!(error.kind(), ErrorKind::InvalidKeyEncoding);
    }
    let error = KeyFormat::decode(&serde_json::json!({ "kty": 7 }), None).expect_err("pass");
    assert_eq!(error.path(), Some("kty"));
}

#[test]
fn test_verification_method_key_properties() {
    let verification_method = VerificationMethod::try_from_json_value(&serde_json::json!({
        "id": "#key-1",
        "type": "EcdsaSecp256k1VerificationKey2019",
        "publicKeyHex": "02b97c30de767f084ce3080168ee293053ba33b235d7116a3263d29f1450936b71",
        "ethereumAddress": "0x89a932207c485f85226d86f7cd486a89a24fcc12"
    }))
    .expect("pass");
    assert!(matches!(verification_method.key_format, KeyFormat::Hex(_)));
    assert!(key_types::is_registered(verification_method.r#type.as_str()));
    // Unrecognized members are dropped.
    assert!(verification_method
        .to_json_value()
        .expect("pass")
        .get("ethereumAddress")
        .is_none());

    // A key object under a string-encoding property is still a JWK, and is re-emitted under
    // publicKeyJwk.
    let verification_method = VerificationMethod::try_from_json_value(&serde_json::json!({
        "id": "#key-2",
        "type": "JsonWebKey2020",
        "publicKeyBase58": { "kty": "OKP", "crv": "X25519", "x": "abc" }
    }))
    .expect("pass");
    assert_eq!(verification_method.key_format.property_name(), "publicKeyJwk");

    let error = VerificationMethod::try_from_json_value(&serde_json::json!({
        "id": "#key-3",
        "type": "JsonWebKey2020",
        "publicKeyJwk": "not-an-object"
    }))
    .expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::InvalidKeyEncoding);
    assert_eq!(error.path(), Some("publicKeyJwk"));

    let error = VerificationMethod::try_from_json_value(&serde_json::json!({
        "id": "#key-4",
        "type": "Ed25519VerificationKey2018",
        "publicKeyBase58": "abc",
        "publicKeyHex": "00"
    }))
    .expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::InvalidKeyEncoding);

    let error = VerificationMethod::try_from_json_value(&serde_json::json!({
        "id": "#key-5",
        "type": "Ed25519VerificationKey2018"
    }))
    .expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::InvalidKeyEncoding);

    let error = VerificationMethod::try_from_json_value(&serde_json::json!({
        "id": "#key-6",
        "publicKeyHex": "00"
    }))
    .expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::InvalidVerificationMethod);
    assert_eq!(error.path(), Some("type"));

    let error = VerificationMethod::try_from_json_value(&serde_json::json!({
        "id": "#key-7",
        "type": "T",
        "controller": "did:example:a b",
        "publicKeyHex": "00"
    }))
    .expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::InvalidIdentifier);
    assert_eq!(error.path(), Some("controller"));
}

#[test]
fn test_verification_relationship_polymorphism() {
    let reference =
        VerificationRelationship::try_from_json_value(&serde_json::json!("#key-1")).expect("pass");
    assert_eq!(reference, VerificationRelationship::Reference("#key-1".into()));
    assert_eq!(reference.effective_id(), "#key-1");
    assert_eq!(reference.as_reference_o(), Some("#key-1"));
    assert!(!reference.is_embedded());

    let embedded = VerificationRelationship::try_from_json_value(&serde_json::json!({
        "id": "#key-1",
        "type": "Ed25519VerificationKey2018",
        "publicKeyBase58": "H3C2AVvLMv6gmMNam3uVAjZpfkcJCwDwnZn6z3wXmqPV"
    }))
    .expect("pass");
    assert!(embedded.is_embedded());
    assert_eq!(embedded.effective_id(), "#key-1");
    assert_eq!(
        embedded.as_embedded_o().expect("pass").r#type,
        key_types::ED25519_VERIFICATION_KEY_2018
    );
    assert_ne!(reference, embedded);

    for value in [serde_json::json!(""), serde_json::json!(3), serde_json::json!(["#key-1"])] {
        let error = VerificationRelationship::try_from_json_value(&value).expect_err("pass");
        assert_eq!(error.kind(), ErrorKind::InvalidVerificationRelationship);
    }

    // serde integration round trip.
    let s = serde_json::to_string(&embedded).expect("pass");
    assert_eq!(
        serde_json::from_str::<VerificationRelationship>(s.as_str()).expect("pass"),
        embedded
    );
    assert_eq!(serde_json::to_string(&reference).expect("pass"), "\"#key-1\"");
}

#[test]
fn test_context_forms() {
    let context =
        Context::try_from_json_value(&serde_json::json!("https://www.w3.org/ns/did/v1"))
            .expect("pass");
    assert!(context.is_single());
    // A scalar context stays a scalar.
    assert_eq!(
        context.to_json_value(),
        serde_json::json!("https://www.w3.org/ns/did/v1")
    );

    let value = serde_json::json!(["https://www.w3.org/ns/did/v1"]);
    let context = Context::try_from_json_value(&value).expect("pass");
    assert_eq!(
        context.uris(),
        &ContextURIs::Sequence(vec!["https://www.w3.org/ns/did/v1".to_string()])
    );
    assert_eq!(context.to_json_value(), value);

    let value = serde_json::json!(["c", "a", "b"]);
    let context = Context::try_from_json_value(&value).expect("pass");
    assert_eq!(context.uri_v(), &["c".to_string(), "a".to_string(), "b".to_string()]);
    assert_eq!(context.to_json_value(), value);

    let value = serde_json::json!([
        "https://www.w3.org/ns/did/v1",
        { "@base": "did:example:123", "ex": "https://example.com/vocab#" }
    ]);
    let context = Context::try_from_json_value(&value).expect("pass");
    assert_eq!(context.uri_v().len(), 1);
    assert_eq!(context.extension_m().len(), 2);
    assert_eq!(context.to_json_value(), value);

    // An empty trailing object is kept on the wire, and distinguishes the context from one
    // without it.
    let value = serde_json::json!(["https://www.w3.org/ns/did/v1", {}]);
    let context = Context::try_from_json_value(&value).expect("pass");
    assert!(context.has_trailing_object());
    assert!(context.extension_m().is_empty());
    assert_eq!(context.to_json_value(), value);
    assert_ne!(
        context,
        Context::try_from_json_value(&serde_json::json!(["https://www.w3.org/ns/did/v1"]))
            .expect("pass")
    );
    assert!(!Context::single("x").has_trailing_object());

    assert_eq!(Context::from("x"), Context::single("x"));
    assert_eq!(
        Context::from(vec!["x".to_string()]),
        Context::sequence(vec!["x".to_string()])
    );
    assert_ne!(Context::single("x"), Context::sequence(vec!["x".to_string()]));

    for (value, path) in [
        (serde_json::json!(7), ""),
        (serde_json::json!({ "@base": "x" }), ""),
        (serde_json::json!([{ "@base": "x" }, "a"]), "[0]"),
        (serde_json::json!(["a", null]), "[1]"),
    ] {
        let error = Context::try_from_json_value(&value).expect_err("pass");
        assert_eq!(error.kind(), ErrorKind::InvalidContext);
        assert_eq!(error.path(), Some(path));
    }
}

#[test]
fn test_controller_forms() {
    let controller =
        Controller::try_from_json_value(&serde_json::json!("did:example:1")).expect("pass");
    assert!(matches!(controller, Controller::Single(_)));
    assert_eq!(controller.to_json_value(), serde_json::json!("did:example:1"));
    assert!(controller.contains("did:example:1"));

    let value = serde_json::json!(["did:example:1", "did:example:2"]);
    let controller = Controller::try_from_json_value(&value).expect("pass");
    assert_eq!(controller.as_slice().len(), 2);
    assert_eq!(controller.to_json_value(), value);
    assert!(controller.contains("did:example:2"));
    assert!(!controller.contains("did:example:3"));

    let error = Controller::try_from_json_value(&serde_json::json!({})).expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::InvalidController);
    let error =
        Controller::try_from_json_value(&serde_json::json!(["did:example:1", 2])).expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::InvalidController);
}

#[test]
fn test_service() {
    let value = serde_json::json!({
        "id": "did:example:123#edv",
        "type": "EncryptedDataVault",
        "serviceEndpoint": "https://edv.example.com/",
        "accept": ["didcomm/v2"],
        "priority": 0
    });
    let service = Service::try_from_json_value(&value).expect("pass");
    assert_eq!(service.id.fragment_o(), Some("edv"));
    assert_eq!(
        service.extension_m.keys().collect::<Vec<_>>(),
        vec!["accept", "priority"]
    );
    assert_eq!(service.to_json_value().expect("pass"), value);
    assert_eq!(
        serde_json::from_value::<Service>(serde_json::to_value(&service).expect("pass"))
            .expect("pass"),
        service
    );

    let error = Service::try_from_json_value(&serde_json::json!({
        "id": "#s",
        "serviceEndpoint": "https://x"
    }))
    .expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::InvalidService);
    assert_eq!(error.path(), Some("type"));

    let error = Service::try_from_json_value(&serde_json::json!("#s")).expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::InvalidService);
}

#[test]
fn test_key_purpose() {
    for (index, key_purpose) in KeyPurpose::VARIANTS.into_iter().enumerate() {
        assert_eq!(key_purpose.integer_value() as usize, index);
        assert_eq!(KeyPurpose::try_from(index as u8).expect("pass"), key_purpose);
        assert_eq!(
            key_purpose.as_str().parse::<KeyPurpose>().expect("pass"),
            key_purpose
        );
    }
    assert_eq!(KeyPurpose::variant_count(), 5);
    KeyPurpose::try_from(5u8).expect_err("pass");
    "verificationMethod".parse::<KeyPurpose>().expect_err("pass");
}

#[test]
fn test_hash_json_value_ignores_member_order() {
    use std::hash::Hasher;
    let hash = |value: &serde_json::Value| {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        did_document::hash_json_value(value, &mut hasher);
        hasher.finish()
    };
    let a = serde_json::json!({ "p": [1, 2], "q": { "r": null, "s": 1.5 } });
    let b = serde_json::json!({ "q": { "s": 1.5, "r": null }, "p": [1, 2] });
    assert_eq!(a, b);
    assert_eq!(hash(&a), hash(&b));
    assert_ne!(
        hash(&serde_json::json!([1, 2])),
        hash(&serde_json::json!([2, 1]))
    );
}
