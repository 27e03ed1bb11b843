//! Registration form
//!
//! Field formats are checked by the presentation layer before a form is
//! built. Construction here only guarantees structural completeness.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use super::Course;

/// A registration request for exactly one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    first_name: String,
    last_name: String,
    email: String,
    student_id: String,
    course: Course,
}

impl RegistrationForm {
    /// Build a form, rejecting any blank field
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        student_id: impl Into<String>,
        course: Course,
    ) -> Result<Self> {
        let form = Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            student_id: student_id.into(),
            course,
        };
        form.check_complete()?;
        Ok(form)
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// The course this form registers for
    pub fn course(&self) -> &Course {
        &self.course
    }

    fn check_complete(&self) -> Result<()> {
        let fields = [
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("student_id", self.student_id.as_str()),
            ("course.code", self.course.code.as_str()),
        ];

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ClientError::InvalidForm(format!("{} is empty", field))),
            None => Ok(()),
        }
    }
}
