//! Serialization channels
//!
//! One outbound and one inbound channel are layered on separate handles of
//! the same transport. The outbound channel announces itself with a stream
//! header on construction; the inbound channel waits for the peer's.

use std::io::{self, BufReader, BufWriter};
use std::net::Shutdown;

use crate::error::Result;
use crate::protocol::{read_frame, read_stream_header, write_frame, write_stream_header, Message};
use super::transport::{shutdown_quietly, Transport};

/// Writes framed messages to the peer
pub struct FrameWriter<T: Transport> {
    inner: BufWriter<T>,
}

impl<T: Transport> FrameWriter<T> {
    /// Wrap a stream handle and send the stream header
    pub fn new(stream: T) -> Result<Self> {
        let mut inner = BufWriter::new(stream);
        write_stream_header(&mut inner)?;
        Ok(Self { inner })
    }

    /// Send one message, flushed before returning
    pub fn send(&mut self, message: &Message) -> Result<()> {
        write_frame(&mut self.inner, message)
    }

    /// Flush anything buffered and shut down the write half
    pub fn close(self) -> io::Result<()> {
        let stream = self.inner.into_inner().map_err(|e| e.into_error())?;
        shutdown_quietly(&stream, Shutdown::Write)
    }
}

/// Reads framed messages from the peer
pub struct FrameReader<T: Transport> {
    inner: BufReader<T>,
    max_frame_size: u32,
}

impl<T: Transport> FrameReader<T> {
    /// Wrap a stream handle and wait for the peer's stream header
    pub fn new(stream: T, max_frame_size: u32) -> Result<Self> {
        let mut inner = BufReader::new(stream);
        read_stream_header(&mut inner)?;
        Ok(Self {
            inner,
            max_frame_size,
        })
    }

    /// Block until one complete message arrives
    pub fn receive(&mut self) -> Result<Message> {
        read_frame(&mut self.inner, self.max_frame_size)
    }

    /// Shut down the read half, discarding anything unread
    pub fn close(self) -> io::Result<()> {
        let stream = self.inner.into_inner();
        shutdown_quietly(&stream, Shutdown::Read)
    }
}
