//! Length-prefixed text field.

use std::borrow::Cow;
use std::fmt;

/// A string field as stored on the wire.
///
/// The bytes are kept exactly as read; no text encoding is guaranteed by the
/// format, so conversion to `str` happens only for display.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct DdlString<'a>(Cow<'a, [u8]>);

impl<'a> DdlString<'a> {
    /// Wraps bytes borrowed from the input.
    pub fn borrowed(bytes: &'a [u8]) -> Self {
        Self(Cow::Borrowed(bytes))
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the byte length (the value of the wire length prefix).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the text if the bytes are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Decodes the bytes for display, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Detaches the string from the input buffer.
    pub fn into_owned(self) -> DdlString<'static> {
        DdlString(Cow::Owned(self.0.into_owned()))
    }
}

impl From<&'static str> for DdlString<'static> {
    fn from(s: &'static str) -> Self {
        DdlString(Cow::Borrowed(s.as_bytes()))
    }
}

impl PartialEq<str> for DdlString<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for DdlString<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Display for DdlString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for DdlString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DdlString<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}
