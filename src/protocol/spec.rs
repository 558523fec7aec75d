//! Legacy command spec table
//!
//! Static lookup of command name to arity and request encoding, covering the
//! command set of Redis 1.2.6. Only consulted for the `Legacy` protocol; the
//! `MultiBulk` protocol sends any command unchecked.

/// Request encoding kind for a legacy command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEncoding {
    /// Space-joined arguments, no length framing
    Inline,
    /// Space-joined arguments with one length-framed trailing argument
    Bulk,
    /// Array of length-framed arguments
    MultiBulk,
}

/// Static description of a legacy command.
///
/// A positive `arity` is an exact argument count (the command name counts);
/// a negative `arity` of `-n` means "at least n arguments".
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub arity: i32,
    pub encoding: RequestEncoding,
}

const fn spec(name: &'static str, arity: i32, encoding: RequestEncoding) -> CommandSpec {
    CommandSpec {
        name,
        arity,
        encoding,
    }
}

use RequestEncoding::{Bulk, Inline, MultiBulk};

/// Command set of Redis 1.2.6
static COMMAND_SPECS: &[CommandSpec] = &[
    spec("auth", 2, Inline),
    spec("get", 2, Inline),
    spec("set", 3, Bulk),
    spec("setnx", 3, Bulk),
    spec("append", 3, Bulk),
    spec("substr", 4, Inline),
    spec("del", -2, Inline),
    spec("exists", 2, Inline),
    spec("incr", 2, Inline),
    spec("decr", 2, Inline),
    spec("rpush", 3, Bulk),
    spec("lpush", 3, Bulk),
    spec("rpop", 2, Inline),
    spec("lpop", 2, Inline),
    spec("brpop", -3, Inline),
    spec("blpop", -3, Inline),
    spec("llen", 2, Inline),
    spec("lindex", 3, Inline),
    spec("lset", 4, Bulk),
    spec("lrange", 4, Inline),
    spec("ltrim", 4, Inline),
    spec("lrem", 4, Bulk),
    spec("rpoplpush", 3, Bulk),
    spec("sadd", 3, Bulk),
    spec("srem", 3, Bulk),
    spec("smove", 4, Bulk),
    spec("sismember", 3, Bulk),
    spec("scard", 2, Inline),
    spec("spop", 2, Inline),
    spec("srandmember", 2, Inline),
    spec("sinter", -2, Inline),
    spec("sinterstore", -3, Inline),
    spec("sunion", -2, Inline),
    spec("sunionstore", -3, Inline),
    spec("sdiff", -2, Inline),
    spec("sdiffstore", -3, Inline),
    spec("smembers", 2, Inline),
    spec("zadd", 4, Bulk),
    spec("zincrby", 4, Bulk),
    spec("zrem", 3, Bulk),
    spec("zremrangebyscore", 4, Inline),
    spec("zmerge", -3, Inline),
    spec("zmergeweighed", -4, Inline),
    spec("zrange", -4, Inline),
    spec("zrank", 3, Bulk),
    spec("zrevrank", 3, Bulk),
    spec("zrangebyscore", -4, Inline),
    spec("zcount", 4, Inline),
    spec("zrevrange", -4, Inline),
    spec("zcard", 2, Inline),
    spec("zscore", 3, Bulk),
    spec("incrby", 3, Inline),
    spec("decrby", 3, Inline),
    spec("getset", 3, Bulk),
    spec("randomkey", 1, Inline),
    spec("select", 2, Inline),
    spec("move", 3, Inline),
    spec("rename", 3, Inline),
    spec("renamenx", 3, Inline),
    spec("keys", 2, Inline),
    spec("dbsize", 1, Inline),
    spec("ping", 1, Inline),
    spec("echo", 2, Bulk),
    spec("save", 1, Inline),
    spec("bgsave", 1, Inline),
    spec("rewriteaof", 1, Inline),
    spec("bgrewriteaof", 1, Inline),
    spec("shutdown", 1, Inline),
    spec("lastsave", 1, Inline),
    spec("type", 2, Inline),
    spec("flushdb", 1, Inline),
    spec("flushall", 1, Inline),
    spec("sort", -2, Inline),
    spec("info", 1, Inline),
    spec("mget", -2, Inline),
    spec("expire", 3, Inline),
    spec("expireat", 3, Inline),
    spec("ttl", 2, Inline),
    spec("slaveof", 3, Inline),
    spec("debug", -2, Inline),
    spec("mset", -3, MultiBulk),
    spec("msetnx", -3, MultiBulk),
    spec("monitor", 1, Inline),
    spec("multi", 1, Inline),
    spec("exec", 1, Inline),
    spec("discard", 1, Inline),
    spec("hset", 4, MultiBulk),
    spec("hget", 3, Bulk),
    spec("hdel", 3, Bulk),
    spec("hlen", 2, Inline),
    spec("hkeys", 2, Inline),
    spec("hvals", 2, Inline),
    spec("hgetall", 2, Inline),
    spec("hexists", 3, Bulk),
    spec("config", -2, Bulk),
];

/// Look up a legacy command spec by name, case-insensitively
pub fn lookup_spec(name: &[u8]) -> Option<&'static CommandSpec> {
    COMMAND_SPECS
        .iter()
        .find(|s| s.name.as_bytes().eq_ignore_ascii_case(name))
}
