//! # redwire
//!
//! A client-side implementation of the Redis wire protocol (RESP) with:
//! - Binary-safe byte strings (embedded NUL bytes survive round-trip)
//! - All three request framings (Inline, Bulk, MultiBulk)
//! - Cursor-based reply decoding for pipelining
//! - MULTI/EXEC/DISCARD transaction batching
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Caller                                │
//! │     Command / CommandBatch / Transaction / exec_str          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ args: Vec<ByteBuffer>
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   CommandEncoder                             │
//! │       (arity validation + Inline/Bulk/MultiBulk framing)     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ wire bytes
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Connection (trait)                           │
//! │          send(&[u8])  /  receive() -> Bytes                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ reply bytes
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   ReplyDecoder                               │
//! │    (Reply, bytes_consumed) — repeatable for pipelining       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod buffer;
pub mod protocol;
pub mod command;
pub mod pipeline;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use buffer::ByteBuffer;
pub use command::{exec_args, exec_str, Command};
pub use config::Config;
pub use error::{RedisError, Result};
pub use network::{Connection, TcpConnection};
pub use pipeline::{CommandBatch, Transaction};
pub use protocol::{Protocol, Reply};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of redwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
