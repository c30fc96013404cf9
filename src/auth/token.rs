use crate::error::ApiError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims encoded within an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the account's unique identifier.
    pub sub: Uuid,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

fn secret() -> Result<String, ApiError> {
    std::env::var("JWT_SECRET")
        .map_err(|_| ApiError::InternalServerError("JWT_SECRET not set".into()))
}

/// Generates a JWT for a given account id, expiring in 24 hours.
/// Requires the `JWT_SECRET` environment variable for signing.
pub fn generate_token(user_id: Uuid) -> Result<String, ApiError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret()?.as_bytes()),
    )
    .map_err(|e| ApiError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT and decodes its claims. Default validation applies
/// (signature, expiration). A malformed, tampered, or expired token maps to
/// `ApiError::Unauthorized`.
pub fn verify_token(token: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret()?.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref JWT_ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    }

    // Helper to run test logic with a temporarily set JWT_SECRET
    fn run_with_temp_jwt_secret<F>(secret_value: &str, test_logic: F)
    where
        F: FnOnce(),
    {
        let _guard = JWT_ENV_LOCK.lock().unwrap();

        let original_secret_val = std::env::var("JWT_SECRET").ok();
        std::env::set_var("JWT_SECRET", secret_value);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(test_logic));

        if let Some(original) = original_secret_val {
            std::env::set_var("JWT_SECRET", original);
        } else {
            std::env::remove_var("JWT_SECRET");
        }

        if let Err(panic_payload) = result {
            std::panic::resume_unwind(panic_payload);
        }
    }

    #[test]
    fn test_token_generation_and_verification() {
        run_with_temp_jwt_secret("test_secret_for_gen_verify", || {
            let user_id = Uuid::new_v4();
            let token = generate_token(user_id).unwrap();
            let claims = verify_token(&token).unwrap();
            assert_eq!(claims.sub, user_id);
        });
    }

    #[test]
    fn test_token_expiration() {
        run_with_temp_jwt_secret("test_secret_for_expiration", || {
            let expiration = chrono::Utc::now()
                .checked_sub_signed(chrono::Duration::hours(2))
                .expect("valid timestamp")
                .timestamp() as usize;

            let claims_expired = Claims {
                sub: Uuid::new_v4(),
                exp: expiration,
            };
            let expired_token = encode(
                &Header::default(),
                &claims_expired,
                &EncodingKey::from_secret("test_secret_for_expiration".as_bytes()),
            )
            .unwrap();

            match verify_token(&expired_token) {
                Err(ApiError::Unauthorized(msg)) => {
                    assert!(msg.contains("ExpiredSignature"), "unexpected message: {}", msg);
                }
                Ok(_) => panic!("Token should have been invalid due to expiration"),
                Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
            }
        });
    }

    #[test]
    fn test_invalid_token_signature() {
        run_with_temp_jwt_secret("a_completely_different_secret", || {
            run_with_inner_secret();
        });

        fn run_with_inner_secret() {
            let token_signed_with_other_secret = {
                let claims = Claims {
                    sub: Uuid::new_v4(),
                    exp: chrono::Utc::now()
                        .checked_add_signed(chrono::Duration::hours(1))
                        .expect("valid timestamp")
                        .timestamp() as usize,
                };
                encode(
                    &Header::default(),
                    &claims,
                    &EncodingKey::from_secret("some_other_secret".as_bytes()),
                )
                .unwrap()
            };

            match verify_token(&token_signed_with_other_secret) {
                Err(ApiError::Unauthorized(msg)) => {
                    assert!(
                        msg.contains("InvalidSignature") || msg.contains("InvalidToken"),
                        "unexpected message: {}",
                        msg
                    );
                }
                Ok(_) => panic!("Token should have been invalid due to signature mismatch"),
                Err(e) => panic!("Unexpected error type for invalid signature: {:?}", e),
            }
        }
    }
}
