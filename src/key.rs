//! Key representation and normalization
//!
//! Callers address entries with either UTF-8 text or arbitrary binary keys.
//! Both forms normalize to the same canonical byte span, so a text key and a
//! binary key with identical UTF-8 content address the same stored entry.
//!
//! The variant is resolved once, at construction; downstream code only ever
//! sees the canonical span.

use bytes::Bytes;

use crate::error::{BridgeError, Result};

/// Wire tag for the text variant
const TAG_TEXT: u8 = 0x01;

/// Wire tag for the binary variant
const TAG_BINARY: u8 = 0x02;

/// A caller-supplied key in one of two surface forms
///
/// Equality, ordering, and hashing all operate on the canonical byte span,
/// so `Key::from("a") == Key::from(&b"a"[..])`. The storage engine sees a
/// single keyspace regardless of which form the caller used.
#[derive(Debug, Clone)]
pub enum Key {
    /// UTF-8 text key
    Text(String),

    /// Arbitrary binary key
    Binary(Bytes),
}

impl Key {
    /// Borrow the canonical byte span for this key
    ///
    /// Constant time; no allocation. The span length is the exact byte
    /// count with no implicit null termination.
    pub fn as_span(&self) -> &[u8] {
        match self {
            Key::Text(text) => text.as_bytes(),
            Key::Binary(bytes) => bytes.as_ref(),
        }
    }

    /// Reconstruct a key from a stored byte span
    ///
    /// With `prefer_text` the bytes are interpreted as UTF-8 and the call
    /// fails with [`BridgeError::Encoding`] if they are not valid UTF-8.
    /// Without it the bytes are wrapped as a binary key, which always
    /// succeeds.
    pub fn from_span(span: &[u8], prefer_text: bool) -> Result<Self> {
        if prefer_text {
            let text = std::str::from_utf8(span).map_err(|_| BridgeError::Encoding)?;
            Ok(Key::Text(text.to_owned()))
        } else {
            Ok(Key::Binary(Bytes::copy_from_slice(span)))
        }
    }

    /// Encode this key in the tagged wire form: tag byte + span bytes
    ///
    /// Used by callers that persist or transport keys themselves and need
    /// to recover the surface form later.
    pub fn to_tagged(&self) -> Vec<u8> {
        let span = self.as_span();
        let mut buf = Vec::with_capacity(1 + span.len());
        buf.push(match self {
            Key::Text(_) => TAG_TEXT,
            Key::Binary(_) => TAG_BINARY,
        });
        buf.extend_from_slice(span);
        buf
    }

    /// Decode a key from the tagged wire form
    ///
    /// Fails with [`BridgeError::InvalidKeyType`] for an unknown tag byte
    /// (including the empty input) and [`BridgeError::Encoding`] if a text
    /// tag carries non-UTF-8 bytes.
    pub fn from_tagged(bytes: &[u8]) -> Result<Self> {
        let (&tag, span) = bytes
            .split_first()
            .ok_or(BridgeError::InvalidKeyType(0x00))?;

        match tag {
            TAG_TEXT => Self::from_span(span, true),
            TAG_BINARY => Self::from_span(span, false),
            unknown => Err(BridgeError::InvalidKeyType(unknown)),
        }
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.as_span().len()
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.as_span().is_empty()
    }
}

// =============================================================================
// Span-based equality, ordering, hashing
// =============================================================================

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.as_span() == other.as_span()
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_span().cmp(other.as_span())
    }
}

impl std::hash::Hash for Key {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_span().hash(state);
    }
}

// =============================================================================
// Conversions from caller types
// =============================================================================

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        Key::Text(text.to_owned())
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        Key::Text(text)
    }
}

impl From<&[u8]> for Key {
    fn from(bytes: &[u8]) -> Self {
        Key::Binary(Bytes::copy_from_slice(bytes))
    }
}

impl From<Vec<u8>> for Key {
    fn from(bytes: Vec<u8>) -> Self {
        Key::Binary(Bytes::from(bytes))
    }
}

impl From<Bytes> for Key {
    fn from(bytes: Bytes) -> Self {
        Key::Binary(bytes)
    }
}
