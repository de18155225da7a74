use std::borrow::Cow;

/// Fieldless discriminant of [`Error`], for callers that only care which rule failed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    MalformedDocument,
    InvalidIdentifier,
    InvalidContext,
    InvalidController,
    InvalidVerificationMethod,
    InvalidVerificationRelationship,
    InvalidKeyEncoding,
    InvalidService,
    Serialization,
}

/// Decode errors carry the path of the field that failed (e.g. `authentication[1].publicKeyJwk`)
/// and a reason.  Each enclosing codec prepends its own path segment via [`Error::within`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed DID document: {0}")]
    MalformedDocument(Cow<'static, str>),
    #[error("Invalid identifier at {path}: {reason}")]
    InvalidIdentifier {
        path: String,
        reason: Cow<'static, str>,
    },
    #[error("Invalid context at {path}: {reason}")]
    InvalidContext {
        path: String,
        reason: Cow<'static, str>,
    },
    #[error("Invalid controller at {path}: {reason}")]
    InvalidController {
        path: String,
        reason: Cow<'static, str>,
    },
    #[error("Invalid verification method at {path}: {reason}")]
    InvalidVerificationMethod {
        path: String,
        reason: Cow<'static, str>,
    },
    #[error("Invalid verification relationship at {path}: {reason}")]
    InvalidVerificationRelationship {
        path: String,
        reason: Cow<'static, str>,
    },
    #[error("Invalid key encoding at {path}: {reason}")]
    InvalidKeyEncoding {
        path: String,
        reason: Cow<'static, str>,
    },
    #[error("Invalid service at {path}: {reason}")]
    InvalidService {
        path: String,
        reason: Cow<'static, str>,
    },
    #[error("Serialization error: {0}")]
    Serialization(Cow<'static, str>),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedDocument(_) => ErrorKind::MalformedDocument,
            Self::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            Self::InvalidContext { .. } => ErrorKind::InvalidContext,
            Self::InvalidController { .. } => ErrorKind::InvalidController,
            Self::InvalidVerificationMethod { .. } => ErrorKind::InvalidVerificationMethod,
            Self::InvalidVerificationRelationship { .. } => {
                ErrorKind::InvalidVerificationRelationship
            }
            Self::InvalidKeyEncoding { .. } => ErrorKind::InvalidKeyEncoding,
            Self::InvalidService { .. } => ErrorKind::InvalidService,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }
    /// The path of the field that failed, if this is a field-level error.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::InvalidIdentifier { path, .. }
            | Self::InvalidContext { path, .. }
            | Self::InvalidController { path, .. }
            | Self::InvalidVerificationMethod { path, .. }
            | Self::InvalidVerificationRelationship { path, .. }
            | Self::InvalidKeyEncoding { path, .. }
            | Self::InvalidService { path, .. } => Some(path.as_str()),
            Self::MalformedDocument(_) | Self::Serialization(_) => None,
        }
    }
    /// Prepend `segment` to the path of this error.  A segment is either a field name
    /// (`"service"`) or an array index (`"[3]"`).
    pub fn within(mut self, segment: &str) -> Self {
        match &mut self {
            Self::InvalidIdentifier { path, .. }
            | Self::InvalidContext { path, .. }
            | Self::InvalidController { path, .. }
            | Self::InvalidVerificationMethod { path, .. }
            | Self::InvalidVerificationRelationship { path, .. }
            | Self::InvalidKeyEncoding { path, .. }
            | Self::InvalidService { path, .. } => {
                *path = join_path(segment, path);
            }
            Self::MalformedDocument(_) | Self::Serialization(_) => {}
        }
        self
    }
    /// Convenience for prepending an array index segment.
    pub fn within_index(self, index: usize) -> Self {
        self.within(&format!("[{}]", index))
    }
    pub(crate) fn invalid_identifier(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidIdentifier {
            path: String::new(),
            reason: reason.into(),
        }
    }
    pub(crate) fn invalid_context(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidContext {
            path: String::new(),
            reason: reason.into(),
        }
    }
    pub(crate) fn invalid_controller(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidController {
            path: String::new(),
            reason: reason.into(),
        }
    }
    pub(crate) fn invalid_verification_method(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidVerificationMethod {
            path: String::new(),
            reason: reason.into(),
        }
    }
    pub(crate) fn invalid_verification_relationship(
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidVerificationRelationship {
            path: String::new(),
            reason: reason.into(),
        }
    }
    pub(crate) fn invalid_key_encoding(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidKeyEncoding {
            path: String::new(),
            reason: reason.into(),
        }
    }
    pub(crate) fn invalid_service(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidService {
            path: String::new(),
            reason: reason.into(),
        }
    }
}

fn join_path(segment: &str, path: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else if path.starts_with('[') {
        format!("{}{}", segment, path)
    } else {
        format!("{}.{}", segment, path)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string().into())
    }
}
