//! Network Module
//!
//! Transport and per-exchange connection handling.
//!
//! ## Architecture
//! - A `Connector` opens a fresh `Transport` for every exchange
//! - The `Connection` layers an outbound and an inbound channel on it
//! - Closing tears down inbound, outbound, then the stream

mod transport;
mod channel;
mod connection;

#[cfg(test)]
pub(crate) mod fake;

pub use transport::{Connector, TcpConnector, Transport};
pub use channel::{FrameReader, FrameWriter};
pub use connection::Connection;
