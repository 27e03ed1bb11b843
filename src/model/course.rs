//! Course record

use std::fmt;

use serde::{Deserialize, Serialize};

/// An offered course, as listed by the service for one term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Course {
    /// Short identifier, unique within a term (e.g. "IFT1015")
    pub code: String,

    /// Display name
    pub name: String,
}

impl Course {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.code, self.name)
    }
}
