//! Reply decoder
//!
//! Cursor-based recursive-descent parser over RESP reply tags. Each call
//! decodes exactly one reply from the front of the buffer and reports how
//! many bytes it consumed, so a caller holding several concatenated replies
//! (a pipeline or an EXEC result) can decode them one after another by
//! advancing its own offset. The decoder keeps no state between calls.
//!
//! Truncated or unrecognized input always fails the whole call; a partial
//! reply is never returned.

use crate::buffer::ByteBuffer;
use crate::error::{RedisError, Result};

use super::reply::Reply;

/// Decode one reply from the front of `buf`.
///
/// Returns the reply and the number of bytes consumed; `buf[consumed..]` is
/// the start of the next reply, if any.
pub fn decode_reply(buf: &[u8]) -> Result<(Reply, usize)> {
    let tag = match buf.first() {
        Some(tag) => *tag,
        None => return Err(malformed("empty reply buffer")),
    };
    match tag {
        b'-' => {
            let (line, next) = read_line(buf, 1)?;
            Ok((Reply::Error(ByteBuffer::new(line)), next))
        }
        b'+' => {
            let (line, next) = read_line(buf, 1)?;
            Ok((Reply::Status(ByteBuffer::new(line)), next))
        }
        b':' => {
            let (value, next) = read_integer_line(buf, 1)?;
            Ok((Reply::Integer(value), next))
        }
        b'$' => {
            let (payload, next) = read_bulk_body(buf, 1)?;
            Ok((Reply::Bulk(payload), next))
        }
        b'*' => decode_multibulk(buf),
        other => Err(malformed(format!("unexpected reply tag 0x{other:02x}"))),
    }
}

/// Parse a `*<n>\r\n` array header at the front of `buf`.
///
/// Used by transaction execution, where the elements following the header are
/// full replies rather than plain bulks.
pub(crate) fn decode_multibulk_header(buf: &[u8]) -> Result<(i64, usize)> {
    match buf.first() {
        Some(b'*') => read_integer_line(buf, 1),
        Some(other) => Err(malformed(format!(
            "expected multibulk header, found tag 0x{other:02x}"
        ))),
        None => Err(malformed("empty reply buffer")),
    }
}

fn decode_multibulk(buf: &[u8]) -> Result<(Reply, usize)> {
    let (count, mut pos) = read_integer_line(buf, 1)?;
    if count == -1 {
        return Ok((Reply::MultiBulk(None), pos));
    }
    if count < 0 {
        return Err(malformed(format!("invalid multibulk count {count}")));
    }

    // The count is wire-supplied and untrusted; cap the preallocation by what
    // the remaining bytes could possibly hold (a null bulk `$-1\r\n` is the
    // smallest element at 5 bytes) so a hostile header cannot force a huge
    // allocation before the elements are validated.
    let possible = buf.len().saturating_sub(pos) / 5;
    let mut elements = Vec::with_capacity((count as usize).min(possible));
    for _ in 0..count {
        match buf.get(pos) {
            Some(b'$') => {}
            Some(other) => {
                return Err(malformed(format!(
                    "expected bulk element, found tag 0x{other:02x}"
                )))
            }
            None => return Err(malformed("truncated multibulk reply")),
        }
        let (payload, next) = read_bulk_body(buf, pos + 1)?;
        elements.push(payload);
        pos = next;
    }
    Ok((Reply::MultiBulk(Some(elements)), pos))
}

/// Read the bytes between `pos` and the next CRLF; the returned position is
/// just past the terminator.
fn read_line(buf: &[u8], pos: usize) -> Result<(&[u8], usize)> {
    let rest = buf.get(pos..).ok_or_else(|| malformed("truncated reply"))?;
    let end = rest
        .windows(2)
        .position(|w| w == b"\r\n")
        .map(|off| pos + off)
        .ok_or_else(|| malformed("missing CRLF terminator"))?;
    Ok((&buf[pos..end], end + 2))
}

/// Read a signed decimal line (length, count or integer reply body)
fn read_integer_line(buf: &[u8], pos: usize) -> Result<(i64, usize)> {
    let (line, next) = read_line(buf, pos)?;
    Ok((parse_int(line)?, next))
}

/// Lenient signed-decimal parse; a leading `+` is accepted
fn parse_int(bytes: &[u8]) -> Result<i64> {
    let text =
        std::str::from_utf8(bytes).map_err(|_| malformed("non-ASCII integer field"))?;
    text.parse::<i64>()
        .map_err(|_| malformed(format!("invalid integer field {text:?}")))
}

/// Parse a bulk body (the part after the `$` tag): `<len>\r\n<payload>\r\n`,
/// where a length of -1 is the null bulk with no payload line at all.
fn read_bulk_body(buf: &[u8], pos: usize) -> Result<(Option<ByteBuffer>, usize)> {
    let (len, next) = read_integer_line(buf, pos)?;
    if len == -1 {
        return Ok((None, next));
    }
    if len < 0 {
        return Err(malformed(format!("invalid bulk length {len}")));
    }
    let len = len as usize;
    if buf.len() < next + len + 2 {
        return Err(malformed("truncated bulk payload"));
    }
    if &buf[next + len..next + len + 2] != b"\r\n" {
        return Err(malformed("bulk payload missing CRLF terminator"));
    }
    let payload = ByteBuffer::new(&buf[next..next + len]);
    Ok((Some(payload), next + len + 2))
}

fn malformed(detail: impl Into<String>) -> RedisError {
    RedisError::MalformedReply(detail.into())
}
