//! Configuration for coursereg
//!
//! Centralized client configuration with sensible defaults.

use std::time::Duration;

use crate::error::{ClientError, Result};

/// Default registration service host
pub const DEFAULT_HOST: &str = "localhost";

/// Default registration service port
pub const DEFAULT_PORT: u16 = 1337;

/// Default maximum frame payload (16 MB)
pub const DEFAULT_MAX_FRAME_SIZE: u32 = 16 * 1024 * 1024;

/// Main configuration for a ProtocolClient
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Service Address
    // -------------------------------------------------------------------------
    /// Host name or IP of the registration service
    pub host: String,

    /// TCP port of the registration service
    pub port: u16,

    // -------------------------------------------------------------------------
    // Timeouts (milliseconds, 0 = wait forever)
    // -------------------------------------------------------------------------
    /// Connection establishment timeout
    pub connect_timeout_ms: u64,

    /// Read timeout while waiting for a response
    pub read_timeout_ms: u64,

    /// Write timeout while sending a request
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Framing
    // -------------------------------------------------------------------------
    /// Largest frame payload accepted from the service (in bytes)
    pub max_frame_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The `host:port` address of the service
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }

    /// Reject configurations no connection could be made with
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ClientError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ClientError::Config("port must not be 0".to_string()));
        }
        if self.max_frame_size == 0 {
            return Err(ClientError::Config(
                "max_frame_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn millis(ms: u64) -> Option<Duration> {
    if ms > 0 {
        Some(Duration::from_millis(ms))
    } else {
        None
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the service host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the service port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
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

    /// Set connect, read and write timeouts at once
    pub fn timeouts_ms(self, ms: u64) -> Self {
        self.connect_timeout_ms(ms).read_timeout_ms(ms).write_timeout_ms(ms)
    }

    /// Set the largest accepted frame payload (in bytes)
    pub fn max_frame_size(mut self, size: u32) -> Self {
        self.config.max_frame_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
