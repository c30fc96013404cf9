use crate::{
    error::ApiError,
    models::{TeacherInput, TeacherPatch},
    services,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

/// Retrieves every teacher.
///
/// ## Responses:
/// - `200 OK`: a JSON array of `Teacher` objects.
/// - `401 Unauthorized`: missing or invalid token.
/// - `500 Internal Server Error`: backend failure.
#[get("")]
pub async fn get_teachers(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let teachers = services::teachers::list(&pool).await?;
    Ok(HttpResponse::Ok().json(teachers))
}

/// Retrieves a single teacher by its id.
///
/// ## Responses:
/// - `200 OK`: the `Teacher` object.
/// - `400 Bad Request`: the id is not a valid UUID.
/// - `404 Not Found`: no teacher with this id.
#[get("/{id}")]
pub async fn get_teacher(
    pool: web::Data<PgPool>,
    id: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let id = services::parse_id(&id)?;
    let teacher = services::teachers::find(&pool, id).await?;
    Ok(HttpResponse::Ok().json(teacher))
}

/// Creates a new teacher.
///
/// ## Request Body:
/// A JSON object matching `TeacherInput`: `name`, `email`, `phone`,
/// `subjectsTaught`, and `employeeId` are required; `address`, `hireDate`
/// (defaults to now), and `isActive` (defaults to true) are optional.
///
/// ## Responses:
/// - `201 Created`: the created `Teacher`, including generated id and timestamps.
/// - `400 Bad Request`: validation failure (the body enumerates every
///   offending field) or a duplicate `email`/`employeeId`.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_teacher(
    pool: web::Data<PgPool>,
    input: web::Json<TeacherInput>,
) -> Result<impl Responder, ApiError> {
    let teacher = services::teachers::create(&pool, input.into_inner()).await?;
    Ok(HttpResponse::Created().json(teacher))
}

/// Partially updates an existing teacher. Only supplied fields change.
///
/// ## Responses:
/// - `200 OK`: the full post-update `Teacher`.
/// - `400 Bad Request`: empty body, validation failure, malformed id, or a
///   duplicate `email`/`employeeId`.
/// - `404 Not Found`: no teacher with this id.
#[put("/{id}")]
pub async fn update_teacher(
    pool: web::Data<PgPool>,
    id: web::Path<String>,
    patch: web::Json<TeacherPatch>,
) -> Result<impl Responder, ApiError> {
    let id = services::parse_id(&id)?;
    let teacher = services::teachers::update(&pool, id, patch.into_inner()).await?;
    Ok(HttpResponse::Ok().json(teacher))
}

/// Deletes a teacher and echoes the removed record.
///
/// Students referencing the deleted teacher keep their reference; it simply
/// stops expanding on subsequent reads.
///
/// ## Responses:
/// - `200 OK`: `{"message": ..., "deletedTeacher": ...}`.
/// - `400 Bad Request`: the id is not a valid UUID.
/// - `404 Not Found`: no teacher with this id.
#[delete("/{id}")]
pub async fn delete_teacher(
    pool: web::Data<PgPool>,
    id: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let id = services::parse_id(&id)?;
    let teacher = services::teachers::delete(&pool, id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Teacher deleted successfully",
        "deletedTeacher": teacher
    })))
}
