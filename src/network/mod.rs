//! Network Module
//!
//! The byte transport the protocol core runs over.
//!
//! ## Architecture
//! - [`Connection`] trait: `send` whole buffers, `receive` whole reply bursts
//! - [`TcpConnection`]: blocking TCP implementation with fixed timeouts
//!
//! The protocol core only ever sees the trait; tests substitute an in-memory
//! double.

mod connection;

pub use connection::{Connection, TcpConnection};
