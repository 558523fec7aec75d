//! Binary-safe byte strings
//!
//! [`ByteBuffer`] is the substrate for all protocol data: command arguments,
//! encoded wire bytes and reply payloads. Unlike a text string, its length is
//! authoritative and embedded NUL bytes never truncate binary operations
//! (concatenation, duplication, slicing).
//!
//! The type deliberately has no implicit conversion to `&str`; the only
//! textual view is [`ByteBuffer::as_text`], which is documented as lossy.

use std::borrow::Cow;
use std::fmt;

/// A length-authoritative, binary-safe byte string with a single owner.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    /// Create a buffer holding a copy of `bytes`
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Create a zero-filled buffer of `size` bytes
    pub fn zeroed(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Create a buffer from a text string; the length is the text length
    pub fn from_text(text: &str) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
        }
    }

    /// Concatenate two optional buffers into a new one.
    ///
    /// An absent side contributes nothing: `concat(Some(a), None)` is a
    /// duplicate of `a`, `concat(None, Some(b))` a duplicate of `b`, and
    /// `concat(None, None)` an empty buffer. The resulting length is always
    /// the sum of the input lengths; embedded NUL bytes are preserved.
    pub fn concat(to: Option<&ByteBuffer>, from: Option<&ByteBuffer>) -> ByteBuffer {
        let mut bytes = Vec::with_capacity(
            to.map_or(0, ByteBuffer::len) + from.map_or(0, ByteBuffer::len),
        );
        if let Some(to) = to {
            bytes.extend_from_slice(&to.bytes);
        }
        if let Some(from) = from {
            bytes.extend_from_slice(&from.bytes);
        }
        ByteBuffer { bytes }
    }

    /// Number of bytes in the buffer (authoritative, independent of content)
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Full binary content
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lossy textual view: truncates at the first embedded NUL byte and
    /// replaces invalid UTF-8. The buffer's length is unaffected.
    pub fn as_text(&self) -> Cow<'_, str> {
        let end = self
            .bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.bytes.len());
        String::from_utf8_lossy(&self.bytes[..end])
    }

    /// An owned copy of the buffer
    pub fn duplicate(&self) -> ByteBuffer {
        self.clone()
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b\"{}\"", self.bytes.escape_ascii())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<&str> for ByteBuffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}
