//! Protocol Module
//!
//! Implements the Redis wire protocol (RESP) from the client side.
//!
//! ## Request Framings
//! ```text
//! Inline:    arg arg ... \r\n
//! Bulk:      arg arg ... <len>\r\n<lastarg>\r\n
//! MultiBulk: *<n>\r\n($<len>\r\n<arg>\r\n){n}
//! ```
//!
//! ## Reply Tags
//! ```text
//! -<message>\r\n            error line
//! +<message>\r\n            status line
//! :<signed integer>\r\n     integer
//! $<len>\r\n<payload>\r\n   bulk (len = -1 means null)
//! *<n>\r\n<bulk>{n}         multibulk (n = -1 means null array)
//! ```

mod decoder;
mod encoder;
mod reply;
mod spec;

pub use decoder::decode_reply;
pub(crate) use decoder::decode_multibulk_header;
pub use encoder::encode_command;
pub use reply::Reply;
pub use spec::{lookup_spec, CommandSpec, RequestEncoding};

/// Which request framing family a command is encoded with.
///
/// `Legacy` selects Inline/Bulk/MultiBulk per command from the static spec
/// table and validates arity locally. `MultiBulk` always uses the
/// array-of-bulk-strings framing and leaves validation to the server; it is
/// the only framing modern servers still need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Legacy,
    MultiBulk,
}
