use crate::{Error, Result};

/// An identifier as it appears in a DID document: either an absolute URI (e.g. a DID such as
/// `did:example:123`, or `https://example.com/ctx`) or a relative reference, most commonly a
/// bare fragment such as `#key-1`.  The original string is kept verbatim, so serializing a URI
/// reproduces exactly what was parsed.
#[derive(
    Clone,
    Debug,
    derive_more::Deref,
    serde_with::DeserializeFromStr,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    serde_with::SerializeDisplay,
)]
pub struct URI(String);

/// Base used only to check that a relative reference resolves to something well-formed.
const RELATIVE_REFERENCE_BASE: &str = "https://relative-reference.invalid/";

impl URI {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
    pub fn into_string(self) -> String {
        self.0
    }
    /// True iff this is a relative reference (in particular, a bare `#fragment`).
    pub fn is_relative(&self) -> bool {
        url::Url::parse(self.0.as_str()).is_err()
    }
    /// Returns the fragment (the portion after '#', not including the '#'), if present.
    pub fn fragment_o(&self) -> Option<&str> {
        self.0.split_once('#').map(|(_, fragment)| fragment)
    }
    /// Checks syntactic well-formedness.  This does not check that the identifier is resolvable
    /// or that it conforms to any particular DID method.
    pub fn validate(s: &str) -> Result<()> {
        if s.is_empty() {
            return Err(Error::invalid_identifier("identifier must not be empty"));
        }
        // url::Url::parse silently strips or percent-encodes these, but they are never legal in a
        // URI (RFC 3986 section 2).
        if let Some(c) = s.chars().find(|c| !is_uri_char(*c)) {
            return Err(Error::invalid_identifier(format!(
                "identifier {:?} contains the character {:?}, which is not allowed in a URI",
                s, c
            )));
        }
        check_percent_encoding(s)?;
        match url::Url::parse(s) {
            Ok(_) => Ok(()),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                // RFC 3986 section 4.2: the first segment of a scheme-less relative path must not
                // contain a colon, otherwise it would read as a scheme.
                let first_segment = s
                    .split(|c: char| matches!(c, '/' | '?' | '#'))
                    .next()
                    .unwrap_or_default();
                if first_segment.contains(':') {
                    return Err(Error::invalid_identifier(format!(
                        "identifier {:?} has no valid scheme, but its first path segment contains ':'",
                        s
                    )));
                }
                let base = url::Url::parse(RELATIVE_REFERENCE_BASE)
                    .expect("programmer error: relative-reference base is a valid URL");
                base.join(s).map(|_| ()).map_err(|e| {
                    Error::invalid_identifier(format!(
                        "identifier {:?} is not a valid relative reference: {}",
                        s, e
                    ))
                })
            }
            Err(e) => Err(Error::invalid_identifier(format!(
                "identifier {:?} is not a valid URI: {}",
                s, e
            ))),
        }
    }
}

/// Unreserved, reserved (gen-delims and sub-delims), and '%'.
fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.'
                | '_'
                | '~'
                | ':'
                | '/'
                | '?'
                | '#'
                | '['
                | ']'
                | '@'
                | '!'
                | '$'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | ';'
                | '='
                | '%'
        )
}

/// Every '%' must begin a pct-encoded triplet.
fn check_percent_encoding(s: &str) -> Result<()> {
    let bytes = s.as_bytes();
    for (index, _) in s.match_indices('%') {
        let is_triplet = bytes
            .get(index + 1..index + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !is_triplet {
            return Err(Error::invalid_identifier(format!(
                "identifier {:?} has a '%' at byte {} that is not followed by two hex digits",
                s, index
            )));
        }
    }
    Ok(())
}

impl std::fmt::Display for URI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl std::str::FromStr for URI {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for URI {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> {
        Self::validate(s.as_str())?;
        Ok(Self(s))
    }
}

impl TryFrom<&str> for URI {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl AsRef<str> for URI {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<URI> for String {
    fn from(uri: URI) -> Self {
        uri.0
    }
}
