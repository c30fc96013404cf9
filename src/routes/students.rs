use crate::{
    error::ApiError,
    models::{StudentInput, StudentPatch},
    services,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

/// Retrieves every student, each with its `teacher` reference expanded to
/// `{id, name, email}` (or the raw id when the reference is dangling).
#[get("")]
pub async fn get_students(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let students = services::students::list(&pool).await?;
    Ok(HttpResponse::Ok().json(students))
}

/// Retrieves a single student by its id, teacher expanded.
///
/// ## Responses:
/// - `200 OK`: the `StudentResponse` object.
/// - `400 Bad Request`: the id is not a valid UUID.
/// - `404 Not Found`: no student with this id.
#[get("/{id}")]
pub async fn get_student(
    pool: web::Data<PgPool>,
    id: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let id = services::parse_id(&id)?;
    let student = services::students::find(&pool, id).await?;
    Ok(HttpResponse::Ok().json(student))
}

/// Creates a new student.
///
/// The referenced teacher must exist at the moment of the write; otherwise
/// the request is rejected and nothing is persisted.
///
/// ## Request Body:
/// A JSON object matching `StudentInput`: `name`, `email`, `teacher` (UUID of
/// an existing teacher), and `dateOfBirth` are all required.
///
/// ## Responses:
/// - `201 Created`: the created student with its teacher expanded.
/// - `400 Bad Request`: validation failure, unknown teacher reference, or a
///   duplicate `email`.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_student(
    pool: web::Data<PgPool>,
    input: web::Json<StudentInput>,
) -> Result<impl Responder, ApiError> {
    let student = services::students::create(&pool, input.into_inner()).await?;
    Ok(HttpResponse::Created().json(student))
}

/// Partially updates an existing student. Supplying `teacher` re-runs the
/// reference check; leaving it out skips it.
///
/// ## Responses:
/// - `200 OK`: the full post-update student, teacher expanded.
/// - `400 Bad Request`: empty body, validation failure, malformed id,
///   unknown teacher reference, or a duplicate `email`.
/// - `404 Not Found`: no student with this id.
#[put("/{id}")]
pub async fn update_student(
    pool: web::Data<PgPool>,
    id: web::Path<String>,
    patch: web::Json<StudentPatch>,
) -> Result<impl Responder, ApiError> {
    let id = services::parse_id(&id)?;
    let student = services::students::update(&pool, id, patch.into_inner()).await?;
    Ok(HttpResponse::Ok().json(student))
}

/// Deletes a student and echoes the removed record.
///
/// ## Responses:
/// - `200 OK`: `{"message": ..., "deletedStudent": ...}`.
/// - `400 Bad Request`: the id is not a valid UUID.
/// - `404 Not Found`: no student with this id.
#[delete("/{id}")]
pub async fn delete_student(
    pool: web::Data<PgPool>,
    id: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let id = services::parse_id(&id)?;
    let student = services::students::delete(&pool, id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Student deleted successfully",
        "deletedStudent": student
    })))
}
