//! Protocol codec
//!
//! Stream header handshake plus encoding and decoding of frames.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Len (4)  │ CRC (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//! `Len` and `CRC` are big-endian. `CRC` is the CRC32 of the payload.

use std::io::{Read, Write};

use bincode::Options;
use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{ClientError, Result};
use super::Message;

/// Magic bytes opening every stream
pub const STREAM_MAGIC: [u8; 4] = *b"CRSP";

/// Stream header version
pub const STREAM_VERSION: u16 = 1;

/// Stream header size: 4 bytes magic + 2 bytes version
pub const STREAM_HEADER_SIZE: usize = 6;

/// Frame header size: 4 bytes length + 4 bytes CRC
pub const FRAME_HEADER_SIZE: usize = 8;

/// Bincode settings shared by encoder and decoder: fixed-width integers,
/// and a payload must hold exactly one message
fn payload_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

// =============================================================================
// Stream Header
// =============================================================================

/// Write the stream header and flush it so the peer can start reading
pub fn write_stream_header<W: Write>(writer: &mut W) -> Result<()> {
    let mut header = [0u8; STREAM_HEADER_SIZE];
    header[..4].copy_from_slice(&STREAM_MAGIC);
    header[4..].copy_from_slice(&STREAM_VERSION.to_be_bytes());

    writer.write_all(&header)?;
    writer.flush()?;
    Ok(())
}

/// Read the peer's stream header (blocks until it arrives)
pub fn read_stream_header<R: Read>(reader: &mut R) -> Result<()> {
    let mut header = [0u8; STREAM_HEADER_SIZE];
    reader.read_exact(&mut header)?;

    if header[..4] != STREAM_MAGIC {
        return Err(ClientError::ProtocolViolation(format!(
            "Bad stream magic: {:02x?}",
            &header[..4]
        )));
    }

    let version = u16::from_be_bytes([header[4], header[5]]);
    if version != STREAM_VERSION {
        return Err(ClientError::ProtocolViolation(format!(
            "Unsupported stream version: {} (expected {})",
            version, STREAM_VERSION
        )));
    }

    Ok(())
}

// =============================================================================
// Frame Encoding/Decoding
// =============================================================================

/// Encode a message into a complete frame
pub fn encode_frame(message: &Message) -> Result<Bytes> {
    let payload = payload_options().serialize(message)?;
    let payload_len = u32::try_from(payload.len()).map_err(|_| {
        ClientError::ProtocolViolation(format!(
            "Message too large to frame: {} bytes",
            payload.len()
        ))
    })?;

    let mut frame = BytesMut::with_capacity(FRAME_HEADER_SIZE + payload.len());
    frame.put_u32(payload_len);
    frame.put_u32(crc32fast::hash(&payload));
    frame.put_slice(&payload);

    Ok(frame.freeze())
}

/// Decode a complete frame held in memory
pub fn decode_frame(bytes: &[u8], max_frame_size: u32) -> Result<Message> {
    if bytes.len() < FRAME_HEADER_SIZE {
        return Err(ClientError::ProtocolViolation(format!(
            "Incomplete frame header: expected {} bytes, got {}",
            FRAME_HEADER_SIZE,
            bytes.len()
        )));
    }

    let (payload_len, crc) = parse_frame_header(&bytes[..FRAME_HEADER_SIZE], max_frame_size)?;

    let total_len = FRAME_HEADER_SIZE + payload_len;
    if bytes.len() < total_len {
        return Err(ClientError::ProtocolViolation(format!(
            "Incomplete frame payload: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    decode_payload(&bytes[FRAME_HEADER_SIZE..total_len], crc)
}

/// Split a frame header into payload length and checksum
fn parse_frame_header(header: &[u8], max_frame_size: u32) -> Result<(usize, u32)> {
    let payload_len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
    let crc = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);

    if payload_len > max_frame_size {
        return Err(ClientError::ProtocolViolation(format!(
            "Frame too large: {} bytes (max {})",
            payload_len, max_frame_size
        )));
    }

    Ok((payload_len as usize, crc))
}

/// Verify the checksum and deserialize the payload
fn decode_payload(payload: &[u8], expected_crc: u32) -> Result<Message> {
    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(ClientError::ProtocolViolation(format!(
            "Frame checksum mismatch: expected {:08x}, got {:08x}",
            expected_crc, actual_crc
        )));
    }

    // The payload is fully buffered here, so any failure is a malformed value
    payload_options()
        .deserialize(payload)
        .map_err(|e| ClientError::ProtocolViolation(format!("undecodable payload: {}", e)))
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write one frame and flush it
pub fn write_frame<W: Write>(writer: &mut W, message: &Message) -> Result<()> {
    let frame = encode_frame(message)?;
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

/// Read one complete frame from a stream
///
/// Blocks until the frame is received or an error occurs
pub fn read_frame<R: Read>(reader: &mut R, max_frame_size: u32) -> Result<Message> {
    let mut header = [0u8; FRAME_HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let (payload_len, crc) = parse_frame_header(&header, max_frame_size)?;

    let mut payload = vec![0u8; payload_len];
    if payload_len > 0 {
        reader.read_exact(&mut payload)?;
    }

    decode_payload(&payload, crc)
}
