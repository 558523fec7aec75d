//! Error types for redwire
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using RedisError
pub type Result<T> = std::result::Result<T, RedisError>;

/// Unified error type for redwire operations
#[derive(Debug, Error)]
pub enum RedisError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Address resolution failed: {0}")]
    AddressResolution(std::io::Error),

    #[error("Unable to connect to server: {0}")]
    Connect(std::io::Error),

    #[error("Error sending data: {0}")]
    Send(std::io::Error),

    #[error("Error receiving data: {0}")]
    Receive(std::io::Error),

    #[error("Connection timeout")]
    Timeout,

    #[error("Connection closed by peer")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("Unknown redis command: {0}")]
    UnknownCommand(String),

    #[error("Wrong number of arguments for '{name}': got {given}")]
    ArgCount { name: String, given: usize },

    #[error("Argument index {index} out of bounds (command has {len} arguments)")]
    ArgIndexOutOfBounds { index: usize, len: usize },

    #[error("Unbalanced quotes in command string")]
    UnbalancedQuote,

    #[error("Command has no arguments")]
    EmptyCommand,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    // -------------------------------------------------------------------------
    // Transaction Errors
    // -------------------------------------------------------------------------
    #[error("No transaction in progress")]
    NotInTransaction,

    #[error("Transaction rejected by server: {0}")]
    TransactionUnsupported(String),
}
