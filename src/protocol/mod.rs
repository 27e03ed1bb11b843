//! Protocol Module
//!
//! Defines the wire protocol spoken with the registration service.
//!
//! ## Stream Header
//! Each side writes a header as soon as its outbound channel exists:
//! ```text
//! ┌──────────────┬─────────────┐
//! │ Magic (4)    │ Version (2) │
//! │ "CRSP"       │ 0x0001      │
//! └──────────────┴─────────────┘
//! ```
//!
//! ### Frame Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Len (4)  │ CRC (4)  │   Payload (bincode Message) │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Exchanges
//! - Load:     client sends Text("CHARGER <term>"), receives Courses
//! - Register: client sends Text("INSCRIRE"), then Form; receives Text

mod message;
mod codec;

pub use message::{Message, MessageKind, LOAD_COMMAND, REGISTER_COMMAND};
pub use codec::{
    encode_frame, decode_frame, read_frame, write_frame,
    read_stream_header, write_stream_header,
    FRAME_HEADER_SIZE, STREAM_HEADER_SIZE, STREAM_MAGIC, STREAM_VERSION,
};
