//! Reply definitions
//!
//! Typed server replies produced by the decoder.

use crate::buffer::ByteBuffer;

/// A decoded server reply.
///
/// `Bulk(None)` is RESP's null bulk (length -1); `MultiBulk(None)` is the
/// null array, and each array element may independently be a null bulk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Error line (`-`)
    Error(ByteBuffer),

    /// Status line (`+`)
    Status(ByteBuffer),

    /// Signed integer (`:`)
    Integer(i64),

    /// Bulk payload (`$`), or null
    Bulk(Option<ByteBuffer>),

    /// Array of bulk payloads (`*`), or null array
    MultiBulk(Option<Vec<Option<ByteBuffer>>>),
}

impl Reply {
    /// True if the server reported an error
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    /// Integer value, if this is an integer reply
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Reply::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Bulk payload, if this is a non-null bulk reply
    pub fn as_bulk(&self) -> Option<&ByteBuffer> {
        match self {
            Reply::Bulk(Some(payload)) => Some(payload),
            _ => None,
        }
    }
}
