//! Transport abstraction
//!
//! The connection lifecycle only needs a byte stream that can be cloned
//! into independent read/write handles and shut down one direction at a
//! time. `TcpStream` is the production transport.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;

/// A bidirectional byte stream the client can speak the protocol over
pub trait Transport: Read + Write + Sized {
    /// Another handle onto the same underlying stream
    fn try_clone(&self) -> io::Result<Self>;

    /// Shut down the read half, the write half, or both
    fn shutdown(&self, how: Shutdown) -> io::Result<()>;

    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()>;

    fn set_write_timeout(&self, timeout: Option<Duration>) -> io::Result<()>;

    /// Peer description for logging
    fn peer_label(&self) -> String;
}

impl Transport for TcpStream {
    fn try_clone(&self) -> io::Result<Self> {
        TcpStream::try_clone(self)
    }

    fn shutdown(&self, how: Shutdown) -> io::Result<()> {
        TcpStream::shutdown(self, how)
    }

    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_read_timeout(self, timeout)
    }

    fn set_write_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_write_timeout(self, timeout)
    }

    fn peer_label(&self) -> String {
        self.peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

/// Shut down part of a stream, treating an already-closed socket as closed
pub(crate) fn shutdown_quietly<T: Transport>(stream: &T, how: Shutdown) -> io::Result<()> {
    match stream.shutdown(how) {
        Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
        other => other,
    }
}

/// Opens fresh transports to the configured service
pub trait Connector {
    type Stream: Transport;

    fn connect(&self, config: &Config) -> io::Result<Self::Stream>;
}

/// Connects over TCP, trying each resolved address in turn
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self, config: &Config) -> io::Result<TcpStream> {
        let mut last_err = None;

        for addr in (config.host.as_str(), config.port).to_socket_addrs()? {
            let attempt = match config.connect_timeout() {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };

            match attempt {
                Ok(stream) => {
                    // Requests are small; don't let Nagle hold them back
                    stream.set_nodelay(true)?;
                    return Ok(stream);
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("no address resolved for {}", config.addr()),
            )
        }))
    }
}
