use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{Teacher, EMAIL_REGEX};

/// Represents a student as stored in the database. The `teacher` column holds
/// the raw reference; read responses go through [`StudentResponse`], which
/// expands it.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique identifier (UUID v4), system-generated and immutable.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email, unique across all students.
    pub email: String,
    /// Reference to the assigned teacher, by identifier.
    pub teacher: Uuid,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Timestamp of when the record was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the record.
    pub updated_at: DateTime<Utc>,
}

/// Input structure for creating a student.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    #[validate(custom = "crate::models::non_blank")]
    pub name: String,

    #[validate(regex(path = "EMAIL_REGEX", message = "must be a valid email address"))]
    pub email: String,

    /// Must reference an existing teacher at the moment of the write.
    pub teacher: Uuid,

    pub date_of_birth: NaiveDate,
}

/// Partial-update structure for a student. Supplying `teacher` triggers a
/// fresh existence check on the referenced teacher; leaving it out skips it.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    #[validate(custom = "crate::models::non_blank")]
    pub name: Option<String>,

    #[validate(regex(path = "EMAIL_REGEX", message = "must be a valid email address"))]
    pub email: Option<String>,

    pub teacher: Option<Uuid>,

    pub date_of_birth: Option<NaiveDate>,
}

/// The partial teacher snapshot embedded in student read responses.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TeacherRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// How the `teacher` field renders in a response: expanded to a snapshot when
/// the referenced teacher exists, or the raw identifier when the reference is
/// dangling (the teacher was deleted after the student was created).
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TeacherLink {
    Expanded(TeacherRef),
    Id(Uuid),
}

/// A student as returned by the API, with the teacher reference join-expanded.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub teacher: TeacherLink,
    pub date_of_birth: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Creates a new `Student` from validated input with a fresh UUID and
    /// both timestamps set to the current time.
    pub fn new(input: StudentInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            email: input.email,
            teacher: input.teacher,
            date_of_birth: input.date_of_birth,
            created_at: now,
            updated_at: now,
        }
    }
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.teacher.is_none()
            && self.date_of_birth.is_none()
    }
}

impl StudentResponse {
    /// The pure merge step of the join-expansion: combines a student row with
    /// the looked-up teacher, if any. Kept separate from the lookup itself so
    /// the merge can be tested without a database.
    pub fn from_parts(student: Student, teacher: Option<Teacher>) -> Self {
        let link = match teacher {
            Some(t) => TeacherLink::Expanded(TeacherRef {
                id: t.id,
                name: t.name,
                email: t.email,
            }),
            None => TeacherLink::Id(student.teacher),
        };
        Self {
            id: student.id,
            name: student.name,
            email: student.email,
            teacher: link,
            date_of_birth: student.date_of_birth,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeacherInput;

    fn sample_teacher() -> Teacher {
        Teacher::new(TeacherInput {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            phone: "123".to_string(),
            address: None,
            hire_date: None,
            is_active: None,
            subjects_taught: vec!["Math".to_string()],
            employee_id: "E1".to_string(),
        })
    }

    fn sample_student(teacher_id: Uuid) -> Student {
        Student::new(StudentInput {
            name: "Bo".to_string(),
            email: "bo@x.com".to_string(),
            teacher: teacher_id,
            date_of_birth: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
        })
    }

    #[test]
    fn test_student_input_validation() {
        let input = StudentInput {
            name: "Bo".to_string(),
            email: "bo@x.com".to_string(),
            teacher: Uuid::new_v4(),
            date_of_birth: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
        };
        assert!(input.validate().is_ok());

        let input = StudentInput {
            name: " ".to_string(),
            email: "bo@".to_string(),
            teacher: Uuid::new_v4(),
            date_of_birth: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_expansion_with_existing_teacher() {
        let teacher = sample_teacher();
        let teacher_id = teacher.id;
        let student = sample_student(teacher_id);

        let response = StudentResponse::from_parts(student, Some(teacher));
        match response.teacher {
            TeacherLink::Expanded(ref r) => {
                assert_eq!(r.id, teacher_id);
                assert_eq!(r.name, "Ada");
                assert_eq!(r.email, "ada@x.com");
            }
            TeacherLink::Id(_) => panic!("expected an expanded teacher"),
        }

        // Wire format: the expanded teacher is an object.
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["teacher"]["name"], "Ada");
        assert!(json["dateOfBirth"].is_string());
    }

    #[test]
    fn test_expansion_with_dangling_reference() {
        let teacher_id = Uuid::new_v4();
        let student = sample_student(teacher_id);

        let response = StudentResponse::from_parts(student, None);
        assert_eq!(response.teacher, TeacherLink::Id(teacher_id));

        // Wire format: a dangling reference stays a raw identifier.
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["teacher"], teacher_id.to_string());
    }

    #[test]
    fn test_student_patch_empty_detection() {
        let empty: StudentPatch = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        let patch: StudentPatch = serde_json::from_str(r#"{"name": "Bo"}"#).unwrap();
        assert!(!patch.is_empty());
    }
}
