//! Command encoder
//!
//! Produces the exact byte sequence placed on the wire for a command.
//!
//! The `MultiBulk` protocol always uses array-of-bulk-strings framing and
//! performs no validation. The `Legacy` protocol looks the command up in the
//! spec table, validates arity, and selects one of the three historical
//! framings per command. Only Bulk and MultiBulk framings carry binary-safe
//! arguments; Inline is used for commands with no binary payload.

use crate::buffer::ByteBuffer;
use crate::error::{RedisError, Result};

use super::spec::{lookup_spec, RequestEncoding};
use super::Protocol;

/// Encode an argument list into wire format.
///
/// `args[0]` is the command name. Fails with `EmptyCommand` on an empty
/// argument list, and for the legacy protocol with `UnknownCommand` or
/// `ArgCount` before any bytes are produced.
pub fn encode_command(protocol: Protocol, args: &[ByteBuffer]) -> Result<ByteBuffer> {
    let name = match args.first() {
        Some(name) => name,
        None => return Err(RedisError::EmptyCommand),
    };

    if protocol == Protocol::MultiBulk {
        return Ok(encode_multibulk(args));
    }

    let spec = lookup_spec(name.as_bytes())
        .ok_or_else(|| RedisError::UnknownCommand(name.as_text().into_owned()))?;

    let argc = args.len();
    let arity_ok = if spec.arity > 0 {
        argc == spec.arity as usize
    } else {
        argc >= spec.arity.unsigned_abs() as usize
    };
    if !arity_ok {
        return Err(RedisError::ArgCount {
            name: spec.name.to_string(),
            given: argc,
        });
    }

    let encoded = match spec.encoding {
        RequestEncoding::MultiBulk => encode_multibulk(args),
        RequestEncoding::Bulk => encode_bulk(args),
        RequestEncoding::Inline => encode_inline(args),
    };
    tracing::trace!(
        command = spec.name,
        argc,
        bytes = encoded.len(),
        "encoded legacy command"
    );
    Ok(encoded)
}

/// `*<argc>\r\n` then `$<len>\r\n<bytes>\r\n` per argument
fn encode_multibulk(args: &[ByteBuffer]) -> ByteBuffer {
    let mut out = Vec::new();
    out.extend_from_slice(format!("*{}\r\n", args.len()).as_bytes());
    for arg in args {
        out.extend_from_slice(format!("${}\r\n", arg.len()).as_bytes());
        out.extend_from_slice(arg.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    ByteBuffer::from(out)
}

/// Space-joined arguments with the last one length-framed (binary-safe)
fn encode_bulk(args: &[ByteBuffer]) -> ByteBuffer {
    let mut out = Vec::new();
    let (last, head) = match args.split_last() {
        Some(split) => split,
        None => return ByteBuffer::default(),
    };
    for arg in head {
        out.extend_from_slice(arg.as_bytes());
        out.push(b' ');
    }
    out.extend_from_slice(format!("{}\r\n", last.len()).as_bytes());
    out.extend_from_slice(last.as_bytes());
    out.extend_from_slice(b"\r\n");
    ByteBuffer::from(out)
}

/// Every argument followed by a single space, then CRLF
fn encode_inline(args: &[ByteBuffer]) -> ByteBuffer {
    let mut out = Vec::new();
    for arg in args {
        out.extend_from_slice(arg.as_bytes());
        out.push(b' ');
    }
    out.extend_from_slice(b"\r\n");
    ByteBuffer::from(out)
}
