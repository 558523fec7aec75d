//! Connection handling
//!
//! Blocking TCP transport to a Redis server.

use std::io::{ErrorKind, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::{Bytes, BytesMut};

use crate::config::Config;
use crate::error::{RedisError, Result};

/// Byte transport to a Redis server.
///
/// `receive` returns all bytes available within the timeout window: it keeps
/// reading until a read comes back shorter than the chunk size or the peer
/// closes. For a standalone command that is one reply; for a pipeline it is
/// every reply of the round trip, concatenated.
pub trait Connection {
    /// Send the whole buffer
    fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Receive the currently pending reply bytes
    fn receive(&mut self) -> Result<Bytes>;
}

/// Blocking TCP connection with fixed read/write timeouts
pub struct TcpConnection {
    stream: TcpStream,
    chunk_size: usize,
    peer_addr: String,
}

impl TcpConnection {
    /// Connect to the server described by `config`.
    ///
    /// Resolves the host, tries each returned address in order, disables
    /// Nagle's algorithm and applies both timeouts.
    pub fn connect(config: &Config) -> Result<Self> {
        let addrs: Vec<_> = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(RedisError::AddressResolution)?
            .collect();

        let mut last_err = None;
        let mut connected = None;
        for addr in addrs {
            match TcpStream::connect(addr) {
                Ok(stream) => {
                    connected = Some(stream);
                    break;
                }
                Err(e) => last_err = Some(e),
            }
        }
        let stream = match connected {
            Some(stream) => stream,
            None => {
                return Err(RedisError::Connect(last_err.unwrap_or_else(|| {
                    ErrorKind::AddrNotAvailable.into()
                })))
            }
        };

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true).map_err(RedisError::Connect)?;
        if config.read_timeout_ms > 0 {
            stream
                .set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))
                .map_err(RedisError::Connect)?;
        }
        if config.write_timeout_ms > 0 {
            stream
                .set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))
                .map_err(RedisError::Connect)?;
        }

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        tracing::debug!("connected to {}", peer_addr);

        Ok(Self {
            stream,
            chunk_size: config.recv_chunk_size.max(1),
            peer_addr,
        })
    }

    /// Close the connection. Dropping has the same effect; this makes the
    /// intent explicit at call sites.
    pub fn close(self) {
        tracing::debug!("closing connection to {}", self.peer_addr);
    }

    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Connection for TcpConnection {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream.write_all(bytes).map_err(|e| match e.kind() {
            ErrorKind::WouldBlock | ErrorKind::TimedOut => RedisError::Timeout,
            _ => RedisError::Send(e),
        })?;
        tracing::trace!(bytes = bytes.len(), peer = %self.peer_addr, "sent");
        Ok(())
    }

    fn receive(&mut self) -> Result<Bytes> {
        let mut data = BytesMut::new();
        let mut chunk = vec![0u8; self.chunk_size];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    // Peer closed; whatever arrived before is the reply
                    if data.is_empty() {
                        return Err(RedisError::ConnectionClosed);
                    }
                    break;
                }
                Ok(n) => {
                    data.extend_from_slice(&chunk[..n]);
                    // A short read marks the end of the pending data
                    if n < chunk.len() {
                        break;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    return Err(RedisError::Timeout)
                }
                Err(e) => return Err(RedisError::Receive(e)),
            }
        }
        tracing::trace!(bytes = data.len(), peer = %self.peer_addr, "received");
        Ok(data.freeze())
    }
}
