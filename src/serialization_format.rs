/// Output formats for [`crate::DIDDocument::serialize_with`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SerializationFormat {
    /// Compact JSON, recognized fields first, in emission order.
    #[default]
    Compact,
    /// Like Compact, but indented.
    Pretty,
    /// JCS (RFC 8785).  Object members are sorted, so emission order is not kept.
    Canonical,
}
