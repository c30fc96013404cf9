use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::EMAIL_REGEX;

/// Represents a teacher as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Unique identifier (UUID v4), system-generated and immutable.
    pub id: Uuid,
    /// Display name, trimmed on creation.
    pub name: String,
    /// Contact email, unique across all teachers.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Optional postal address.
    pub address: Option<String>,
    /// When the teacher was hired. Defaults to the creation time when omitted.
    pub hire_date: DateTime<Utc>,
    /// Whether the teacher is currently active. Defaults to true.
    pub is_active: bool,
    /// Subjects this teacher teaches. At least one is required.
    pub subjects_taught: Vec<String>,
    /// Employer-assigned identifier, unique across all teachers.
    pub employee_id: String,
    /// Timestamp of when the record was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the record.
    pub updated_at: DateTime<Utc>,
}

/// Input structure for creating a teacher.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeacherInput {
    #[validate(custom = "crate::models::non_blank")]
    pub name: String,

    #[validate(regex(path = "EMAIL_REGEX", message = "must be a valid email address"))]
    pub email: String,

    #[validate(custom = "crate::models::non_blank")]
    pub phone: String,

    pub address: Option<String>,

    /// Defaults to the creation time when omitted.
    pub hire_date: Option<DateTime<Utc>>,

    /// Defaults to true when omitted.
    pub is_active: Option<bool>,

    #[validate(length(min = 1, message = "at least one subject is required"))]
    pub subjects_taught: Vec<String>,

    #[validate(custom = "crate::models::non_blank")]
    pub employee_id: String,
}

/// Partial-update structure for a teacher. Only supplied fields change;
/// validation applies to supplied fields only.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeacherPatch {
    #[validate(custom = "crate::models::non_blank")]
    pub name: Option<String>,

    #[validate(regex(path = "EMAIL_REGEX", message = "must be a valid email address"))]
    pub email: Option<String>,

    #[validate(custom = "crate::models::non_blank")]
    pub phone: Option<String>,

    pub address: Option<String>,

    pub hire_date: Option<DateTime<Utc>>,

    pub is_active: Option<bool>,

    #[validate(length(min = 1, message = "at least one subject is required"))]
    pub subjects_taught: Option<Vec<String>>,

    #[validate(custom = "crate::models::non_blank")]
    pub employee_id: Option<String>,
}

impl Teacher {
    /// Creates a new `Teacher` from validated input, applying defaults:
    /// a fresh UUID, `hire_date` falling back to now, `is_active` to true,
    /// and both timestamps set to the current time.
    pub fn new(input: TeacherInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            email: input.email,
            phone: input.phone,
            address: input.address,
            hire_date: input.hire_date.unwrap_or(now),
            is_active: input.is_active.unwrap_or(true),
            subjects_taught: input.subjects_taught,
            employee_id: input.employee_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TeacherPatch {
    /// True when no field at all was supplied. An empty patch is a client
    /// error, not a silent no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.hire_date.is_none()
            && self.is_active.is_none()
            && self.subjects_taught.is_none()
            && self.employee_id.is_none()
    }
}
