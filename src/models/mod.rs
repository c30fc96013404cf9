pub mod student;
pub mod teacher;
pub mod user;

pub use student::{Student, StudentInput, StudentPatch, StudentResponse, TeacherLink, TeacherRef};
pub use teacher::{Teacher, TeacherInput, TeacherPatch};
pub use user::User;

use lazy_static::lazy_static;
use validator::ValidationError;

lazy_static! {
    // Email pattern shared by both entities. Uniqueness is not checked here;
    // the database enforces it and the error layer surfaces it as a
    // duplicate-key error.
    pub static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").unwrap();
}

/// Rejects strings that are empty or contain only whitespace.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("non_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(EMAIL_REGEX.is_match("ada@x.com"));
        assert!(EMAIL_REGEX.is_match("jane.smith@example.co.uk"));
        assert!(EMAIL_REGEX.is_match("bo-1@school.edu"));

        assert!(!EMAIL_REGEX.is_match("not-an-email"));
        assert!(!EMAIL_REGEX.is_match("missing@tld"));
        assert!(!EMAIL_REGEX.is_match("@example.com"));
        assert!(!EMAIL_REGEX.is_match("spaces in@example.com"));
    }

    #[test]
    fn test_non_blank() {
        assert!(non_blank("Ada").is_ok());
        assert!(non_blank("").is_err());
        assert!(non_blank("   ").is_err());
    }
}
