//! Message definitions
//!
//! Every frame carries exactly one `Message`. The variant tag is what lets a
//! receiver check the shape of a decoded value before using it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::model::{Course, RegistrationForm};

/// Command tag asking for a term's course list
pub const LOAD_COMMAND: &str = "CHARGER";

/// Command tag announcing a registration form
pub const REGISTER_COMMAND: &str = "INSCRIRE";

/// Shape of a message, used in protocol violation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Courses,
    Form,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Text => "text",
            MessageKind::Courses => "course list",
            MessageKind::Form => "registration form",
        };
        f.write_str(name)
    }
}

/// A single value exchanged with the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Command tags and confirmation messages
    Text(String),

    /// A term's offered courses, in service order
    Courses(Vec<Course>),

    /// A registration submission
    Form(RegistrationForm),
}

impl Message {
    /// `CHARGER <term>` request
    pub fn load_request(term: &str) -> Self {
        Message::Text(format!("{} {}", LOAD_COMMAND, term))
    }

    /// `INSCRIRE` request tag, sent ahead of the form
    pub fn register_request() -> Self {
        Message::Text(REGISTER_COMMAND.to_string())
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Text(_) => MessageKind::Text,
            Message::Courses(_) => MessageKind::Courses,
            Message::Form(_) => MessageKind::Form,
        }
    }

    /// Unwrap a course list, or report what arrived instead
    pub fn into_courses(self) -> Result<Vec<Course>> {
        match self {
            Message::Courses(courses) => Ok(courses),
            other => Err(unexpected(MessageKind::Courses, &other)),
        }
    }

    /// Unwrap a text message, or report what arrived instead
    pub fn into_text(self) -> Result<String> {
        match self {
            Message::Text(text) => Ok(text),
            other => Err(unexpected(MessageKind::Text, &other)),
        }
    }
}

fn unexpected(expected: MessageKind, got: &Message) -> ClientError {
    ClientError::ProtocolViolation(format!("expected {}, got {}", expected, got.kind()))
}
