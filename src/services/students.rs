use crate::{
    error::ApiError,
    models::{Student, StudentInput, StudentPatch, StudentResponse, Teacher},
    services::teachers,
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const STUDENT_COLUMNS: &str = "id, name, email, teacher, date_of_birth, created_at, updated_at";

/// The join-expansion step: fetches the referenced teacher (if it still
/// exists) and merges it into the response shape. A dangling reference is
/// tolerated here and renders as the raw id.
pub async fn expand_teacher(pool: &PgPool, student: Student) -> Result<StudentResponse, ApiError> {
    let sql = "SELECT id, name, email, phone, address, hire_date, is_active, subjects_taught, \
         employee_id, created_at, updated_at FROM teachers WHERE id = $1";
    let teacher = sqlx::query_as::<_, Teacher>(sql)
        .bind(student.teacher)
        .fetch_optional(pool)
        .await?;
    Ok(StudentResponse::from_parts(student, teacher))
}

/// Returns every student, newest first, each with its teacher expanded.
/// One teacher lookup per student; fine at this scale.
pub async fn list(pool: &PgPool) -> Result<Vec<StudentResponse>, ApiError> {
    let sql = format!(
        "SELECT {} FROM students ORDER BY created_at DESC",
        STUDENT_COLUMNS
    );
    let students = sqlx::query_as::<_, Student>(&sql).fetch_all(pool).await?;

    let mut responses = Vec::with_capacity(students.len());
    for student in students {
        responses.push(expand_teacher(pool, student).await?);
    }
    Ok(responses)
}

/// Fetches a single student by id, teacher expanded.
pub async fn find(pool: &PgPool, id: Uuid) -> Result<StudentResponse, ApiError> {
    let sql = format!("SELECT {} FROM students WHERE id = $1", STUDENT_COLUMNS);
    let student = sqlx::query_as::<_, Student>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".into()))?;
    expand_teacher(pool, student).await
}

/// Validates the input, confirms the referenced teacher exists, then inserts.
/// The write is not attempted when the reference check fails, so a rejected
/// create leaves no partial record behind.
pub async fn create(pool: &PgPool, input: StudentInput) -> Result<StudentResponse, ApiError> {
    input.validate()?;

    if !teachers::exists(pool, input.teacher).await? {
        return Err(ApiError::Reference(format!(
            "Teacher {} does not exist",
            input.teacher
        )));
    }

    let student = Student::new(input);
    let sql = format!(
        "INSERT INTO students ({}) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
        STUDENT_COLUMNS, STUDENT_COLUMNS
    );
    let created = sqlx::query_as::<_, Student>(&sql)
        .bind(student.id)
        .bind(student.name)
        .bind(student.email)
        .bind(student.teacher)
        .bind(student.date_of_birth)
        .bind(student.created_at)
        .bind(student.updated_at)
        .fetch_one(pool)
        .await?;

    expand_teacher(pool, created).await
}

/// Applies a partial update. The teacher reference is re-checked only when
/// the patch supplies one; updates that leave it untouched skip the check.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: StudentPatch,
) -> Result<StudentResponse, ApiError> {
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No fields provided for update".into()));
    }
    patch.validate()?;

    if let Some(teacher_id) = patch.teacher {
        if !teachers::exists(pool, teacher_id).await? {
            return Err(ApiError::Reference(format!(
                "Teacher {} does not exist",
                teacher_id
            )));
        }
    }

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
    if patch.teacher.is_some() {
        sets.push(format!("teacher = ${}", param));
        param += 1;
    }
    if patch.date_of_birth.is_some() {
        sets.push(format!("date_of_birth = ${}", param));
        param += 1;
    }
    sets.push("updated_at = now()".to_string());

    let sql = format!(
        "UPDATE students SET {} WHERE id = ${} RETURNING {}",
        sets.join(", "),
        param,
        STUDENT_COLUMNS
    );

    // Bind order must mirror the SET list above.
    let mut query = sqlx::query_as::<_, Student>(&sql);
    if let Some(name) = &patch.name {
        query = query.bind(name.trim().to_string());
    }
    if let Some(email) = &patch.email {
        query = query.bind(email);
    }
    if let Some(teacher_id) = patch.teacher {
        query = query.bind(teacher_id);
    }
    if let Some(date_of_birth) = patch.date_of_birth {
        query = query.bind(date_of_birth);
    }
    query = query.bind(id);

    let updated = query
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".into()))?;

    expand_teacher(pool, updated).await
}

/// Removes a student and returns its pre-deletion snapshot, teacher expanded.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<StudentResponse, ApiError> {
    let sql = format!(
        "DELETE FROM students WHERE id = $1 RETURNING {}",
        STUDENT_COLUMNS
    );
    let deleted = sqlx::query_as::<_, Student>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".into()))?;

    expand_teacher(pool, deleted).await
}
