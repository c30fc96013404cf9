use crate::{
    error::ApiError,
    models::{Teacher, TeacherInput, TeacherPatch},
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const TEACHER_COLUMNS: &str = "id, name, email, phone, address, hire_date, is_active, \
     subjects_taught, employee_id, created_at, updated_at";

/// Returns every teacher, newest first. No pagination.
pub async fn list(pool: &PgPool) -> Result<Vec<Teacher>, ApiError> {
    let sql = format!(
        "SELECT {} FROM teachers ORDER BY created_at DESC",
        TEACHER_COLUMNS
    );
    let teachers = sqlx::query_as::<_, Teacher>(&sql).fetch_all(pool).await?;
    Ok(teachers)
}

/// Fetches a single teacher by id.
pub async fn find(pool: &PgPool, id: Uuid) -> Result<Teacher, ApiError> {
    let sql = format!("SELECT {} FROM teachers WHERE id = $1", TEACHER_COLUMNS);
    sqlx::query_as::<_, Teacher>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Teacher not found".into()))
}

/// Reference-integrity check: does a teacher with this id currently exist?
///
/// Returns a plain boolean; an absent teacher is not an error at this layer.
/// The caller decides whether absence aborts the write.
pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool, ApiError> {
    let found = sqlx::query_scalar::<_, Uuid>("SELECT id FROM teachers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Validates the input and inserts a new teacher. A colliding email or
/// employee id surfaces as a duplicate-key error from the unique indexes.
pub async fn create(pool: &PgPool, input: TeacherInput) -> Result<Teacher, ApiError> {
    input.validate()?;

    let teacher = Teacher::new(input);
    let sql = format!(
        "INSERT INTO teachers ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         RETURNING {}",
        TEACHER_COLUMNS, TEACHER_COLUMNS
    );
    let created = sqlx::query_as::<_, Teacher>(&sql)
        .bind(teacher.id)
        .bind(teacher.name)
        .bind(teacher.email)
        .bind(teacher.phone)
        .bind(teacher.address)
        .bind(teacher.hire_date)
        .bind(teacher.is_active)
        .bind(teacher.subjects_taught)
        .bind(teacher.employee_id)
        .bind(teacher.created_at)
        .bind(teacher.updated_at)
        .fetch_one(pool)
        .await?;

    Ok(created)
}

/// Applies a partial update: only supplied fields change, `updated_at` is
/// bumped, and the full post-update record is returned. An empty patch is
/// rejected as a client error.
pub async fn update(pool: &PgPool, id: Uuid, patch: TeacherPatch) -> Result<Teacher, ApiError> {
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No fields provided for update".into()));
    }
    patch.validate()?;

    // Build the SET list dynamically so untouched columns stay untouched.
    let mut sets: Vec<String> = Vec::new();
    let mut param = 1;
    if patch.name.is_some() {
        sets.push(format!("name = ${}", param));
        param += 1;
    }
    if patch.email.is_some() {
        sets.push(format!("email = ${}", param));
        param += 1;
    }
    if patch.phone.is_some() {
        sets.push(format!("phone = ${}", param));
        param += 1;
    }
    if patch.address.is_some() {
        sets.push(format!("address = ${}", param));
        param += 1;
    }
    if patch.hire_date.is_some() {
        sets.push(format!("hire_date = ${}", param));
        param += 1;
    }
    if patch.is_active.is_some() {
        sets.push(format!("is_active = ${}", param));
        param += 1;
    }
    if patch.subjects_taught.is_some() {
        sets.push(format!("subjects_taught = ${}", param));
        param += 1;
    }
    if patch.employee_id.is_some() {
        sets.push(format!("employee_id = ${}", param));
        param += 1;
    }
    sets.push("updated_at = now()".to_string());

    let sql = format!(
        "UPDATE teachers SET {} WHERE id = ${} RETURNING {}",
        sets.join(", "),
        param,
        TEACHER_COLUMNS
    );

    // Bind order must mirror the SET list above.
    let mut query = sqlx::query_as::<_, Teacher>(&sql);
    if let Some(name) = &patch.name {
        query = query.bind(name.trim().to_string());
    }
    if let Some(email) = &patch.email {
        query = query.bind(email);
    }
    if let Some(phone) = &patch.phone {
        query = query.bind(phone);
    }
    if let Some(address) = &patch.address {
        query = query.bind(address);
    }
    if let Some(hire_date) = patch.hire_date {
        query = query.bind(hire_date);
    }
    if let Some(is_active) = patch.is_active {
        query = query.bind(is_active);
    }
    if let Some(subjects) = &patch.subjects_taught {
        query = query.bind(subjects);
    }
    if let Some(employee_id) = &patch.employee_id {
        query = query.bind(employee_id);
    }
    query = query.bind(id);

    query
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Teacher not found".into()))
}

/// Removes a teacher and returns its pre-deletion snapshot.
///
/// Students referencing this teacher are neither deleted nor reassigned;
/// their `teacher` field is left dangling and renders as a raw id on
/// subsequent reads.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Teacher, ApiError> {
    let sql = format!(
        "DELETE FROM teachers WHERE id = $1 RETURNING {}",
        TEACHER_COLUMNS
    );
    sqlx::query_as::<_, Teacher>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Teacher not found".into()))
}
