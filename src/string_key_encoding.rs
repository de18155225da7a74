/// The encodings a verification method may carry its key in as a bare string.  Which one applies
/// cannot be told from the string itself; it is named by the property that carried the string
/// (`publicKeyHex`, `publicKeyBase58`, `publicKeyPem`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum StringKeyEncoding {
    Hex,
    Base58,
    PEM,
}

impl StringKeyEncoding {
    /// An ordered array of all the variants of StringKeyEncoding.
    pub const VARIANTS: [StringKeyEncoding; 3] = [
        StringKeyEncoding::Hex,
        StringKeyEncoding::Base58,
        StringKeyEncoding::PEM,
    ];
    /// The verification method property that carries a key in this encoding.
    pub fn property_name(self) -> &'static str {
        match self {
            StringKeyEncoding::Hex => "publicKeyHex",
            StringKeyEncoding::Base58 => "publicKeyBase58",
            StringKeyEncoding::PEM => "publicKeyPem",
        }
    }
    pub fn from_property_name(property_name: &str) -> Option<Self> {
        Self::VARIANTS
            .into_iter()
            .find(|encoding| encoding.property_name() == property_name)
    }
    pub fn as_str(self) -> &'static str {
        match self {
            StringKeyEncoding::Hex => "hex",
            StringKeyEncoding::Base58 => "base58",
            StringKeyEncoding::PEM => "pem",
        }
    }
}

impl std::fmt::Display for StringKeyEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StringKeyEncoding {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" => Ok(StringKeyEncoding::Hex),
            "base58" => Ok(StringKeyEncoding::Base58),
            "pem" => Ok(StringKeyEncoding::PEM),
            _ => Err("Unrecognized StringKeyEncoding"),
        }
    }
}
