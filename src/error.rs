//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `ApiError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! represent everything from malformed client input to backend failures.
//!
//! `ApiError` implements `actix_web::error::ResponseError` so handlers can
//! return `Result<_, ApiError>` and have errors converted into JSON responses
//! with the right status codes. `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, `jsonwebtoken::errors::Error`, and
//! `bcrypt::BcryptError` allow conversion with the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum ApiError {
    /// Authentication failed or is missing (HTTP 401).
    Unauthorized(String),
    /// A malformed or otherwise unusable request, e.g. an empty update (HTTP 400).
    BadRequest(String),
    /// Client-supplied data violates the entity schema (HTTP 400).
    /// Carries a map from field name to the list of violations for that field,
    /// so the response enumerates every offending field rather than the first.
    Validation(BTreeMap<String, Vec<String>>),
    /// A referenced entity (e.g. a student's teacher) does not exist (HTTP 400).
    Reference(String),
    /// A unique constraint (email, employee id) was violated (HTTP 400).
    DuplicateKey(String),
    /// The identifier in the request path is not a valid UUID (HTTP 400).
    /// Distinct from `NotFound`: a malformed id is a client input error.
    MalformedId(String),
    /// A well-formed identifier matched no record (HTTP 404).
    NotFound(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// An unclassified persistence failure (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Validation(fields) => {
                let names: Vec<&str> = fields.keys().map(String::as_str).collect();
                write!(f, "Validation Error: invalid fields: {}", names.join(", "))
            }
            ApiError::Reference(msg) => write!(f, "Reference Error: {}", msg),
            ApiError::DuplicateKey(msg) => write!(f, "Duplicate Key: {}", msg),
            ApiError::MalformedId(msg) => write!(f, "Malformed Id: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

/// Converts `ApiError` variants into `HttpResponse` objects.
impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            ApiError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            ApiError::Validation(fields) => HttpResponse::BadRequest().json(json!({
                "error": "Validation failed",
                "fields": fields
            })),
            ApiError::Reference(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            ApiError::DuplicateKey(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            ApiError::MalformedId(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            ApiError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            ApiError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            // Backend failures are presented as generic server errors.
            ApiError::DatabaseError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `ApiError`.
///
/// `RowNotFound` maps to `NotFound`, a Postgres unique violation (code 23505)
/// maps to `DuplicateKey`, and anything else becomes `DatabaseError`.
impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> ApiError {
        match error {
            sqlx::Error::RowNotFound => ApiError::NotFound("Record not found".into()),
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                let constraint = db
                    .constraint()
                    .map(|c| format!(" ({})", c))
                    .unwrap_or_default();
                ApiError::DuplicateKey(format!(
                    "A record with this value already exists{}",
                    constraint
                ))
            }
            other => {
                log::error!("database error: {}", other);
                ApiError::DatabaseError(other.to_string())
            }
        }
    }
}

/// Converts `validator::ValidationErrors` into `ApiError::Validation`,
/// preserving one entry per offending field.
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> ApiError {
        let mut fields = BTreeMap::new();
        for (field, violations) in errors.field_errors() {
            let messages = violations
                .iter()
                .map(|v| {
                    v.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", v.code))
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
        ApiError::Validation(fields)
    }
}

/// Converts `jsonwebtoken::errors::Error` into `ApiError::Unauthorized`.
impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(error: jsonwebtoken::errors::Error) -> ApiError {
        ApiError::Unauthorized(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `ApiError::InternalServerError`.
impl From<bcrypt::BcryptError> for ApiError {
    fn from(error: bcrypt::BcryptError) -> ApiError {
        ApiError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = ApiError::Unauthorized("Invalid token".into());
        assert_eq!(error.error_response().status(), 401);

        let error = ApiError::BadRequest("No fields provided for update".into());
        assert_eq!(error.error_response().status(), 400);

        let error = ApiError::Reference("Teacher does not exist".into());
        assert_eq!(error.error_response().status(), 400);

        let error = ApiError::DuplicateKey("duplicate email".into());
        assert_eq!(error.error_response().status(), 400);

        let error = ApiError::MalformedId("not-a-uuid".into());
        assert_eq!(error.error_response().status(), 400);

        let error = ApiError::NotFound("Teacher not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = ApiError::DatabaseError("connection reset".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[test]
    fn test_validation_error_enumerates_fields() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "must not be empty"))]
            name: String,
            #[validate(email(message = "must be a valid email address"))]
            email: String,
        }

        let probe = Probe {
            name: "".into(),
            email: "not-an-email".into(),
        };
        let error: ApiError = probe.validate().unwrap_err().into();

        match error {
            ApiError::Validation(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields["name"], vec!["must not be empty".to_string()]);
                assert_eq!(
                    fields["email"],
                    vec!["must be a valid email address".to_string()]
                );
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        match error {
            ApiError::NotFound(_) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
