//! # coursereg
//!
//! Client for a university course-registration service:
//! - List the courses offered for a term
//! - Submit a registration form for one course
//! - One short-lived TCP connection per request
//! - Checksummed, length-prefixed frames of bincode-encoded messages
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Caller (CLI / presentation)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ load_courses(term) / register(form)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     ProtocolClient                          │
//! │          (one exchange at a time, last-known state)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ connect → send → receive → disconnect
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Connection                            │
//! │       FrameWriter (out)   FrameReader (in)   stream         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │   Transport   │
//!               │     (TCP)     │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ClientError, Result};
pub use config::Config;
pub use model::{Course, RegistrationForm};
pub use client::{ConnectionStats, ProtocolClient};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of coursereg
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
