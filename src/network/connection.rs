//! Connection
//!
//! One connection to the registration service, living for exactly one
//! exchange.

use std::net::Shutdown;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::protocol::Message;
use super::channel::{FrameReader, FrameWriter};
use super::transport::{shutdown_quietly, Transport};

/// A transport stream with its outbound and inbound channels
pub struct Connection<T: Transport> {
    /// Outbound serialization channel
    writer: FrameWriter<T>,

    /// Inbound serialization channel
    reader: FrameReader<T>,

    /// The underlying stream, closed last
    stream: T,

    /// Peer address for logging
    peer_addr: String,
}

impl<T: Transport> Connection<T> {
    /// Set up channels over a freshly connected stream
    ///
    /// The outbound channel is built first: it sends our stream header,
    /// which the peer may wait for before sending its own. If anything
    /// fails the handles are dropped and the stream closes with them.
    pub fn open(stream: T, config: &Config) -> Result<Self> {
        let peer_addr = stream.peer_label();

        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        let writer = FrameWriter::new(stream.try_clone()?)?;
        let reader = FrameReader::new(stream.try_clone()?, config.max_frame_size)?;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            writer,
            reader,
            stream,
            peer_addr,
        })
    }

    /// Send one message to the peer
    pub fn send(&mut self, message: &Message) -> Result<()> {
        tracing::trace!("Sending {} to {}: {:?}", message.kind(), self.peer_addr, message);
        self.writer.send(message)
    }

    /// Wait for the next message from the peer
    pub fn receive(&mut self) -> Result<Message> {
        let message = self.reader.receive()?;
        tracing::trace!("Received {} from {}: {:?}", message.kind(), self.peer_addr, message);
        Ok(message)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Close the inbound channel, the outbound channel, then the stream
    ///
    /// Every step runs even when an earlier one fails; the failures are
    /// reported together afterwards.
    pub fn close(self) -> Result<()> {
        let Connection {
            writer,
            reader,
            stream,
            peer_addr,
        } = self;

        let mut failures = Vec::new();

        if let Err(e) = reader.close() {
            failures.push(format!("inbound channel: {}", e));
        }
        if let Err(e) = writer.close() {
            failures.push(format!("outbound channel: {}", e));
        }
        if let Err(e) = shutdown_quietly(&stream, Shutdown::Both) {
            failures.push(format!("stream: {}", e));
        }
        drop(stream);

        if failures.is_empty() {
            tracing::debug!("Disconnected from {}", peer_addr);
            Ok(())
        } else {
            Err(ClientError::Disconnection(failures.join("; ")))
        }
    }
}
