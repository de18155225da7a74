//! Registered verification method type names, as used in the "type" member of a verification
//! method.  The "type" member is free-form; these are provided for convenience and are not
//! enforced by the codec.
//!
//! See <https://www.w3.org/TR/did-spec-registries/#verification-method-types>.

pub const ED25519_VERIFICATION_KEY_2018: &str = "Ed25519VerificationKey2018";
pub const ED25519_VERIFICATION_KEY_2020: &str = "Ed25519VerificationKey2020";
pub const ECDSA_SECP256K1_VERIFICATION_KEY_2019: &str = "EcdsaSecp256k1VerificationKey2019";
pub const ECDSA_SECP256K1_RECOVERY_METHOD_2020: &str = "EcdsaSecp256k1RecoveryMethod2020";
pub const GPG_VERIFICATION_KEY_2020: &str = "GpgVerificationKey2020";
pub const JSON_WEB_KEY_2020: &str = "JsonWebKey2020";
pub const JWS_VERIFICATION_KEY_2020: &str = "JwsVerificationKey2020";
pub const RSA_VERIFICATION_KEY_2018: &str = "RsaVerificationKey2018";
pub const SCHNORR_SECP256K1_VERIFICATION_KEY_2019: &str = "SchnorrSecp256k1VerificationKey2019";
pub const X25519_KEY_AGREEMENT_KEY_2019: &str = "X25519KeyAgreementKey2019";

/// All of the above, in alphabetical order.
pub const ALL: [&str; 10] = [
    ECDSA_SECP256K1_RECOVERY_METHOD_2020,
    ECDSA_SECP256K1_VERIFICATION_KEY_2019,
    ED25519_VERIFICATION_KEY_2018,
    ED25519_VERIFICATION_KEY_2020,
    GPG_VERIFICATION_KEY_2020,
    JSON_WEB_KEY_2020,
    JWS_VERIFICATION_KEY_2020,
    RSA_VERIFICATION_KEY_2018,
    SCHNORR_SECP256K1_VERIFICATION_KEY_2019,
    X25519_KEY_AGREEMENT_KEY_2019,
];

/// True iff `r#type` is one of the registered type names above (case-sensitive).
pub fn is_registered(r#type: &str) -> bool {
    ALL.contains(&r#type)
}
