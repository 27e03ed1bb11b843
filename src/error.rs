//! Error types for coursereg
//!
//! Provides a unified error type for all client operations.

use thiserror::Error;

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Unified error type for coursereg operations
#[derive(Debug, Error)]
pub enum ClientError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Connect, send or receive failed at the transport level
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    /// Closing the channels or the stream failed
    #[error("Disconnection error: {0}")]
    Disconnection(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// The peer sent something the client does not understand
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Invalid registration form: {0}")]
    InvalidForm(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<bincode::Error> for ClientError {
    fn from(err: bincode::Error) -> Self {
        match *err {
            bincode::ErrorKind::Io(io) => ClientError::Connection(io),
            other => ClientError::ProtocolViolation(format!("undecodable payload: {}", other)),
        }
    }
}

impl ClientError {
    /// True for errors raised by the transport (connect, send, receive)
    pub fn is_connection(&self) -> bool {
        matches!(self, ClientError::Connection(_))
    }

    /// True when the peer sent an unexpected or malformed message
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, ClientError::ProtocolViolation(_))
    }

    /// True when only the cleanup of a connection failed
    pub fn is_disconnection(&self) -> bool {
        matches!(self, ClientError::Disconnection(_))
    }
}
