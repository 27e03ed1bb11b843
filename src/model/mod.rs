//! Model Module
//!
//! Data records exchanged with the registration service.
//!
//! - `Course`: one offered course (code + display name)
//! - `RegistrationForm`: a student's request to register for one course

mod course;
mod form;

pub use course::Course;
pub use form::RegistrationForm;
