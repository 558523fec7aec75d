//! Codec Tests
//!
//! Tests for request encoding and reply decoding.

use redwire::protocol::{decode_reply, encode_command, Protocol, Reply};
use redwire::{ByteBuffer, RedisError};

fn args(values: &[&[u8]]) -> Vec<ByteBuffer> {
    values.iter().map(|v| ByteBuffer::new(v)).collect()
}

// =============================================================================
// Encoder: MultiBulk Protocol
// =============================================================================

#[test]
fn test_encode_multibulk_set() {
    let encoded = encode_command(Protocol::MultiBulk, &args(&[b"SET", b"k", b"v"])).unwrap();
    assert_eq!(
        encoded.as_bytes(),
        b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$1\r\nv\r\n"
    );
}

#[test]
fn test_encode_multibulk_binary_argument() {
    let encoded =
        encode_command(Protocol::MultiBulk, &args(&[b"SET", b"k", b"a\x00b\r\nc"])).unwrap();
    assert_eq!(
        encoded.as_bytes(),
        b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$7\r\na\x00b\r\nc\r\n"
    );
}

#[test]
fn test_encode_multibulk_skips_validation() {
    // Unknown commands and any arity pass through; the server validates
    let encoded = encode_command(Protocol::MultiBulk, &args(&[b"NOSUCHCMD"])).unwrap();
    assert_eq!(encoded.as_bytes(), b"*1\r\n$9\r\nNOSUCHCMD\r\n");
}

#[test]
fn test_encode_empty_args_fails() {
    let result = encode_command(Protocol::MultiBulk, &[]);
    assert!(matches!(result, Err(RedisError::EmptyCommand)));
}

// =============================================================================
// Encoder: Legacy Protocol
// =============================================================================

#[test]
fn test_encode_legacy_inline() {
    let encoded = encode_command(Protocol::Legacy, &args(&[b"GET", b"key1"])).unwrap();
    assert_eq!(encoded.as_bytes(), b"GET key1 \r\n");
}

#[test]
fn test_encode_legacy_bulk_frames_last_argument() {
    let encoded = encode_command(Protocol::Legacy, &args(&[b"SET", b"key1", b"a value"])).unwrap();
    assert_eq!(encoded.as_bytes(), b"SET key1 7\r\na value\r\n");
}

#[test]
fn test_encode_legacy_bulk_binary_payload() {
    let encoded = encode_command(Protocol::Legacy, &args(&[b"SET", b"k", b"\x00\x01\x02"])).unwrap();
    assert_eq!(encoded.as_bytes(), b"SET k 3\r\n\x00\x01\x02\r\n");
}

#[test]
fn test_encode_legacy_multibulk_command() {
    // mset is a multibulk-framed legacy command
    let encoded = encode_command(Protocol::Legacy, &args(&[b"MSET", b"k", b"v"])).unwrap();
    assert_eq!(
        encoded.as_bytes(),
        b"*3\r\n$4\r\nMSET\r\n$1\r\nk\r\n$1\r\nv\r\n"
    );
}

#[test]
fn test_encode_legacy_lookup_is_case_insensitive() {
    let upper = encode_command(Protocol::Legacy, &args(&[b"PING"])).unwrap();
    let lower = encode_command(Protocol::Legacy, &args(&[b"ping"])).unwrap();
    assert_eq!(upper.as_bytes(), b"PING \r\n");
    assert_eq!(lower.as_bytes(), b"ping \r\n");
}

#[test]
fn test_encode_legacy_unknown_command() {
    let result = encode_command(Protocol::Legacy, &args(&[b"NOSUCHCMD"]));
    assert!(matches!(result, Err(RedisError::UnknownCommand(_))));
}

#[test]
fn test_encode_legacy_exact_arity() {
    // get has arity 2: name plus one key
    let too_few = encode_command(Protocol::Legacy, &args(&[b"GET"]));
    assert!(matches!(too_few, Err(RedisError::ArgCount { .. })));

    let too_many = encode_command(Protocol::Legacy, &args(&[b"GET", b"k", b"extra"]));
    assert!(matches!(too_many, Err(RedisError::ArgCount { .. })));

    assert!(encode_command(Protocol::Legacy, &args(&[b"GET", b"k"])).is_ok());
}

#[test]
fn test_encode_legacy_minimum_arity() {
    // del has arity -2: at least the name plus one key
    let too_few = encode_command(Protocol::Legacy, &args(&[b"DEL"]));
    assert!(matches!(too_few, Err(RedisError::ArgCount { .. })));

    assert!(encode_command(Protocol::Legacy, &args(&[b"DEL", b"k1"])).is_ok());
    assert!(encode_command(Protocol::Legacy, &args(&[b"DEL", b"k1", b"k2", b"k3"])).is_ok());
}

// =============================================================================
// Decoder: Single Replies
// =============================================================================

#[test]
fn test_decode_status() {
    let (reply, consumed) = decode_reply(b"+OK\r\n").unwrap();
    assert_eq!(reply, Reply::Status(ByteBuffer::new(b"OK")));
    assert_eq!(consumed, 5);
}

#[test]
fn test_decode_error() {
    let (reply, consumed) = decode_reply(b"-ERR unknown command\r\n").unwrap();
    assert_eq!(reply, Reply::Error(ByteBuffer::new(b"ERR unknown command")));
    assert_eq!(consumed, 22);
    assert!(reply.is_error());
}

#[test]
fn test_decode_integer() {
    let (reply, consumed) = decode_reply(b":1000\r\n").unwrap();
    assert_eq!(reply, Reply::Integer(1000));
    assert_eq!(consumed, 7);
}

#[test]
fn test_decode_negative_integer() {
    let (reply, _) = decode_reply(b":-42\r\n").unwrap();
    assert_eq!(reply, Reply::Integer(-42));
}

#[test]
fn test_decode_integer_with_plus_sign() {
    let (reply, _) = decode_reply(b":+7\r\n").unwrap();
    assert_eq!(reply, Reply::Integer(7));
}

#[test]
fn test_decode_bulk() {
    let (reply, consumed) = decode_reply(b"$5\r\nhello\r\n").unwrap();
    assert_eq!(reply, Reply::Bulk(Some(ByteBuffer::new(b"hello"))));
    assert_eq!(consumed, 11);
}

#[test]
fn test_decode_bulk_with_embedded_nul_and_crlf() {
    let (reply, consumed) = decode_reply(b"$7\r\na\x00b\r\nc\r\n").unwrap();
    assert_eq!(reply, Reply::Bulk(Some(ByteBuffer::new(b"a\x00b\r\nc"))));
    assert_eq!(consumed, 13);
}

#[test]
fn test_decode_empty_bulk() {
    let (reply, consumed) = decode_reply(b"$0\r\n\r\n").unwrap();
    assert_eq!(reply, Reply::Bulk(Some(ByteBuffer::new(b""))));
    assert_eq!(consumed, 6);
}

#[test]
fn test_decode_null_bulk() {
    let (reply, consumed) = decode_reply(b"$-1\r\n").unwrap();
    assert_eq!(reply, Reply::Bulk(None));
    assert_eq!(consumed, 5);
}

#[test]
fn test_decode_multibulk() {
    let (reply, consumed) = decode_reply(b"*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n").unwrap();
    assert_eq!(
        reply,
        Reply::MultiBulk(Some(vec![
            Some(ByteBuffer::new(b"foo")),
            Some(ByteBuffer::new(b"bar")),
        ]))
    );
    assert_eq!(consumed, 22);
}

#[test]
fn test_decode_null_multibulk() {
    let (reply, consumed) = decode_reply(b"*-1\r\n").unwrap();
    assert_eq!(reply, Reply::MultiBulk(None));
    assert_eq!(consumed, 5);
}

#[test]
fn test_decode_empty_multibulk() {
    let (reply, consumed) = decode_reply(b"*0\r\n").unwrap();
    assert_eq!(reply, Reply::MultiBulk(Some(vec![])));
    assert_eq!(consumed, 4);
}

#[test]
fn test_decode_multibulk_with_null_element() {
    let (reply, _) = decode_reply(b"*2\r\n$-1\r\n$1\r\na\r\n").unwrap();
    assert_eq!(
        reply,
        Reply::MultiBulk(Some(vec![None, Some(ByteBuffer::new(b"a"))]))
    );
}

#[test]
fn test_encode_decode_inverse() {
    // A multibulk request is byte-identical to a multibulk reply, so the
    // decoder reproduces the encoder's arguments unchanged
    let original = args(&[b"SET", b"k", b"v"]);
    let encoded = encode_command(Protocol::MultiBulk, &original).unwrap();
    let (reply, consumed) = decode_reply(encoded.as_bytes()).unwrap();
    assert_eq!(consumed, encoded.len());
    assert_eq!(
        reply,
        Reply::MultiBulk(Some(original.into_iter().map(Some).collect()))
    );
}

// =============================================================================
// Decoder: Sequential Decoding (Pipelining)
// =============================================================================

#[test]
fn test_decode_consecutive_replies() {
    let buf = b":1\r\n:2\r\n:3\r\n";
    let mut pos = 0;
    let mut values = Vec::new();
    for _ in 0..3 {
        let (reply, consumed) = decode_reply(&buf[pos..]).unwrap();
        pos += consumed;
        values.push(reply);
    }
    assert_eq!(
        values,
        vec![Reply::Integer(1), Reply::Integer(2), Reply::Integer(3)]
    );
    assert_eq!(pos, buf.len());
}

#[test]
fn test_decode_mixed_reply_sequence() {
    let buf = b"+OK\r\n$3\r\nabc\r\n*1\r\n$-1\r\n-ERR x\r\n";
    let mut pos = 0;
    let mut replies = Vec::new();
    while pos < buf.len() {
        let (reply, consumed) = decode_reply(&buf[pos..]).unwrap();
        pos += consumed;
        replies.push(reply);
    }
    assert_eq!(replies.len(), 4);
    assert_eq!(replies[0], Reply::Status(ByteBuffer::new(b"OK")));
    assert_eq!(replies[1], Reply::Bulk(Some(ByteBuffer::new(b"abc"))));
    assert_eq!(replies[2], Reply::MultiBulk(Some(vec![None])));
    assert_eq!(replies[3], Reply::Error(ByteBuffer::new(b"ERR x")));
}

// =============================================================================
// Decoder: Malformed Input
// =============================================================================

#[test]
fn test_decode_unknown_tag() {
    let result = decode_reply(b"!oops\r\n");
    assert!(matches!(result, Err(RedisError::MalformedReply(_))));
}

#[test]
fn test_decode_empty_buffer() {
    let result = decode_reply(b"");
    assert!(matches!(result, Err(RedisError::MalformedReply(_))));
}

#[test]
fn test_decode_missing_terminator() {
    let result = decode_reply(b"+OK");
    assert!(matches!(result, Err(RedisError::MalformedReply(_))));
}

#[test]
fn test_decode_truncated_bulk_payload() {
    // Length says 10 but only 3 payload bytes follow
    let result = decode_reply(b"$10\r\nabc\r\n");
    assert!(matches!(result, Err(RedisError::MalformedReply(_))));
}

#[test]
fn test_decode_bulk_without_payload_terminator() {
    let result = decode_reply(b"$3\r\nabcXY");
    assert!(matches!(result, Err(RedisError::MalformedReply(_))));
}

#[test]
fn test_decode_truncated_multibulk_fails_whole_decode() {
    // Two elements promised, one present
    let result = decode_reply(b"*2\r\n$1\r\na\r\n");
    assert!(matches!(result, Err(RedisError::MalformedReply(_))));
}

#[test]
fn test_decode_multibulk_with_non_bulk_element() {
    let result = decode_reply(b"*1\r\n:5\r\n");
    assert!(matches!(result, Err(RedisError::MalformedReply(_))));
}

#[test]
fn test_decode_garbage_integer() {
    let result = decode_reply(b":12x4\r\n");
    assert!(matches!(result, Err(RedisError::MalformedReply(_))));
}

#[test]
fn test_decode_invalid_bulk_length() {
    let result = decode_reply(b"$-2\r\n");
    assert!(matches!(result, Err(RedisError::MalformedReply(_))));
}

#[test]
fn test_decode_huge_multibulk_count_fails_without_allocating() {
    // A hostile count far beyond the buffer must fail as truncated input,
    // not reserve gigabytes up front
    let result = decode_reply(b"*2000000000\r\n");
    assert!(matches!(result, Err(RedisError::MalformedReply(_))));
}

#[test]
fn test_decode_absurd_multibulk_count() {
    let result = decode_reply(b"*999999999999999999\r\n");
    assert!(matches!(result, Err(RedisError::MalformedReply(_))));
}

#[test]
fn test_decode_overdeclared_multibulk_count_with_elements() {
    // Count larger than the elements present still decodes what fits and
    // then fails on the missing remainder
    let result = decode_reply(b"*1000000\r\n$1\r\na\r\n");
    assert!(matches!(result, Err(RedisError::MalformedReply(_))));
}
