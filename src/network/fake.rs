//! In-memory transport for unit tests

use std::io::{self, Cursor, Read, Write};
use std::net::Shutdown;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::Config;
use crate::protocol::{write_frame, write_stream_header, Message};
use super::transport::{Connector, Transport};

#[derive(Default)]
struct FakeState {
    inbound: Cursor<Vec<u8>>,
    outbound: Vec<u8>,
    shutdowns: Vec<Shutdown>,
    failing: Vec<Shutdown>,
}

/// In-memory transport; every clone shares one state
#[derive(Clone, Default)]
pub(crate) struct FakeStream {
    state: Arc<Mutex<FakeState>>,
}

impl FakeStream {
    pub(crate) fn with_inbound(bytes: Vec<u8>) -> Self {
        let stream = Self::default();
        stream.state.lock().inbound = Cursor::new(bytes);
        stream
    }

    pub(crate) fn fail_shutdown(&self, how: Shutdown) {
        self.state.lock().failing.push(how);
    }

    pub(crate) fn outbound(&self) -> Vec<u8> {
        self.state.lock().outbound.clone()
    }

    pub(crate) fn shutdowns(&self) -> Vec<Shutdown> {
        self.state.lock().shutdowns.clone()
    }
}

impl Read for FakeStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.state.lock().inbound.read(buf)
    }
}

impl Write for FakeStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state.lock().outbound.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for FakeStream {
    fn try_clone(&self) -> io::Result<Self> {
        Ok(self.clone())
    }

    fn shutdown(&self, how: Shutdown) -> io::Result<()> {
        let mut state = self.state.lock();
        state.shutdowns.push(how);
        if state.failing.contains(&how) {
            Err(io::Error::new(io::ErrorKind::Other, format!("{:?} refused", how)))
        } else {
            Ok(())
        }
    }

    fn set_read_timeout(&self, _timeout: Option<Duration>) -> io::Result<()> {
        Ok(())
    }

    fn set_write_timeout(&self, _timeout: Option<Duration>) -> io::Result<()> {
        Ok(())
    }

    fn peer_label(&self) -> String {
        "fake".to_string()
    }
}

/// Hands out one prepared stream per connect
pub(crate) struct FakeConnector {
    streams: Mutex<Vec<FakeStream>>,
}

impl FakeConnector {
    pub(crate) fn new(streams: Vec<FakeStream>) -> Self {
        Self {
            streams: Mutex::new(streams),
        }
    }
}

impl Connector for FakeConnector {
    type Stream = FakeStream;

    fn connect(&self, _config: &Config) -> io::Result<FakeStream> {
        let mut streams = self.streams.lock();
        if streams.is_empty() {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "no stream left"));
        }
        Ok(streams.remove(0))
    }
}

/// What a well-behaved service sends: its stream header, then `messages`
pub(crate) fn server_bytes(messages: &[Message]) -> Vec<u8> {
    let mut bytes = Vec::new();
    write_stream_header(&mut bytes).unwrap();
    for message in messages {
        write_frame(&mut bytes, message).unwrap();
    }
    bytes
}
