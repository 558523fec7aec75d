//! Configuration for redwire
//!
//! Centralized configuration with sensible defaults.

/// Connection configuration for a Redis client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Server Address
    // -------------------------------------------------------------------------
    /// Server host name or address
    pub host: String,

    /// Server port
    pub port: u16,

    // -------------------------------------------------------------------------
    // I/O Configuration
    // -------------------------------------------------------------------------
    /// Read timeout (milliseconds); 0 disables the timeout
    pub read_timeout_ms: u64,

    /// Write timeout (milliseconds); 0 disables the timeout
    pub write_timeout_ms: u64,

    /// Chunk size for the receive loop; a read shorter than this
    /// marks the end of the currently available reply data
    pub recv_chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            read_timeout_ms: 10_000,
            write_timeout_ms: 10_000,
            recv_chunk_size: 1024,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the receive chunk size (in bytes)
    pub fn recv_chunk_size(mut self, size: usize) -> Self {
        self.config.recv_chunk_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
