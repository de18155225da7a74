/// Enumeration of the verification relationships a DID document can express.  Each corresponds to
/// one document field, and the purpose of an entry is determined solely by which field it appears
/// in, never by the entry's own content.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum KeyPurpose {
    Authentication = 0,
    AssertionMethod = 1,
    KeyAgreement = 2,
    CapabilityDelegation = 3,
    CapabilityInvocation = 4,
}

impl KeyPurpose {
    /// An ordered array of all the variants in KeyPurpose, in the order their fields are emitted
    /// in a serialized DID document.
    pub const VARIANTS: [KeyPurpose; 5] = [
        KeyPurpose::Authentication,
        KeyPurpose::AssertionMethod,
        KeyPurpose::KeyAgreement,
        KeyPurpose::CapabilityDelegation,
        KeyPurpose::CapabilityInvocation,
    ];
    /// Number of variants in KeyPurpose.
    pub const fn variant_count() -> u8 {
        Self::VARIANTS.len() as u8
    }
    pub const fn integer_value(self) -> u8 {
        self as u8
    }
    /// Produce the camelCase string for this variant, as used for the field name in the DID doc.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyPurpose::Authentication => "authentication",
            KeyPurpose::AssertionMethod => "assertionMethod",
            KeyPurpose::KeyAgreement => "keyAgreement",
            KeyPurpose::CapabilityDelegation => "capabilityDelegation",
            KeyPurpose::CapabilityInvocation => "capabilityInvocation",
        }
    }
}

impl std::fmt::Display for KeyPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for KeyPurpose {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authentication" => Ok(KeyPurpose::Authentication),
            "assertionMethod" => Ok(KeyPurpose::AssertionMethod),
            "keyAgreement" => Ok(KeyPurpose::KeyAgreement),
            "capabilityDelegation" => Ok(KeyPurpose::CapabilityDelegation),
            "capabilityInvocation" => Ok(KeyPurpose::CapabilityInvocation),
            _ => Err("Unrecognized KeyPurpose"),
        }
    }
}

impl TryFrom<u8> for KeyPurpose {
    type Error = &'static str;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::VARIANTS
            .get(value as usize)
            .copied()
            .ok_or("Unrecognized KeyPurpose integer value")
    }
}
