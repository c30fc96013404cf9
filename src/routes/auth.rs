use crate::{
    auth::{
        generate_token, hash_password, verify_password, AuthResponse, AuthenticatedUser,
        LoginRequest, RegisterRequest,
    },
    error::ApiError,
    models::User,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Register a new account
///
/// Creates a new account and returns an authentication token.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, ApiError> {
    register_data.validate()?;

    let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(&register_data.email)
        .fetch_optional(&**pool)
        .await?;

    if existing.is_some() {
        return Err(ApiError::BadRequest("Email already registered".into()));
    }

    let password_hash = hash_password(&register_data.password)?;
    let user_id = Uuid::new_v4();

    sqlx::query("INSERT INTO users (id, username, email, password_hash) VALUES ($1, $2, $3, $4)")
        .bind(user_id)
        .bind(&register_data.username)
        .bind(&register_data.email)
        .bind(&password_hash)
        .execute(&**pool)
        .await?;

    let token = generate_token(user_id)?;

    Ok(HttpResponse::Created().json(AuthResponse { token, user_id }))
}

/// Login
///
/// Authenticates an account and returns an authentication token.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, ApiError> {
    login_data.validate()?;

    let account =
        sqlx::query_as::<_, (Uuid, String)>("SELECT id, password_hash FROM users WHERE email = $1")
            .bind(&login_data.email)
            .fetch_optional(&**pool)
            .await?;

    match account {
        Some((user_id, password_hash)) => {
            if verify_password(&login_data.password, &password_hash)? {
                let token = generate_token(user_id)?;
                Ok(HttpResponse::Ok().json(AuthResponse { token, user_id }))
            } else {
                Err(ApiError::Unauthorized("Invalid credentials".into()))
            }
        }
        None => Err(ApiError::Unauthorized("Invalid credentials".into())),
    }
}

/// Returns the account record of the caller, as identified by the bearer
/// token the middleware validated.
#[get("/me")]
pub async fn me(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, ApiError> {
    let record =
        sqlx::query_as::<_, User>("SELECT id, username, email, created_at FROM users WHERE id = $1")
            .bind(user.0)
            .fetch_optional(&**pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(record))
}
