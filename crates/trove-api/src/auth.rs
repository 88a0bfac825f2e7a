use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use trove_types::api::{AuthResponse, Claims, LoginRequest, SignupRequest, UserInfo};

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

/// Uniform message for both unknown email and wrong password — login
/// must not reveal which one failed.
const INVALID_CREDENTIALS: &str = "invalid email or password";

pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let (name, email, password) = match (
        req.name.filter(|s| !s.trim().is_empty()),
        req.email.filter(|s| !s.trim().is_empty()),
        req.password.filter(|s| !s.is_empty()),
    ) {
        (Some(n), Some(e), Some(p)) => (n, e, p),
        _ => {
            return Err(ApiError::Validation(
                "name, email, and password are required".into(),
            ))
        }
    };

    // Check if email is taken
    if state.db.get_user_by_email(&email)?.is_some() {
        return Err(ApiError::Conflict("email already registered".into()));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?
        .to_string();

    let user_id = Uuid::new_v4();
    let created_at = chrono::Utc::now().to_rfc3339();

    // The pre-check above is read-then-insert; a concurrent signup for
    // the same email loses here on the UNIQUE constraint instead.
    state
        .db
        .create_user(&user_id.to_string(), &name, &email, &password_hash, &created_at)
        .map_err(|e| {
            if trove_db::is_constraint_violation(&e) {
                ApiError::Conflict("email already registered".into())
            } else {
                ApiError::Internal(e)
            }
        })?;

    let token = create_token(&state.jwt_secret, user_id, &email, &name)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            message: "User created successfully".into(),
            user: UserInfo {
                id: user_id,
                name,
                email,
            },
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let (email, password) = match (
        req.email.filter(|s| !s.trim().is_empty()),
        req.password.filter(|s| !s.is_empty()),
    ) {
        (Some(e), Some(p)) => (e, p),
        _ => return Err(ApiError::Validation("email and password are required".into())),
    };

    let user = state
        .db
        .get_user_by_email(&email)?
        .ok_or_else(|| ApiError::Auth(INVALID_CREDENTIALS.into()))?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| anyhow::anyhow!("stored password hash is corrupt: {e}"))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::Auth(INVALID_CREDENTIALS.into()))?;

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt user id '{}': {e}", user.id))?;

    let token = create_token(&state.jwt_secret, user_id, &user.email, &user.name)?;

    Ok(Json(AuthResponse {
        token,
        message: "Login successful".into(),
        user: UserInfo {
            id: user_id,
            name: user.name,
            email: user.email,
        },
    }))
}

/// Signed session token embedding the user's public identity, valid for
/// 24 hours. Stateless — validity is signature plus expiry, checked per
/// request by the `AuthClaims` extractor.
pub fn create_token(
    secret: &str,
    user_id: Uuid,
    email: &str,
    name: &str,
) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        name: name.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::hours(24)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn token_round_trips_identity_claims() {
        let user_id = Uuid::new_v4();
        let token = create_token("test-secret", user_id, "a@x.com", "Alice").unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.sub, user_id);
        assert_eq!(data.claims.email, "a@x.com");
        assert_eq!(data.claims.name, "Alice");
    }

    #[test]
    fn password_hashing_verifies_only_the_original() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"pw1", &salt)
            .unwrap()
            .to_string();
        let parsed = PasswordHash::new(&hash).unwrap();

        assert!(Argon2::default().verify_password(b"pw1", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"nope", &parsed).is_err());
    }

    #[test]
    fn token_rejects_wrong_secret() {
        let token = create_token("secret-a", Uuid::new_v4(), "a@x.com", "Alice").unwrap();
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret-b"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
