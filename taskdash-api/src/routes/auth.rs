/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /register` - Create a new account
/// - `POST /login` - Exchange credentials for a bearer token
///
/// Tokens are HS256 JWTs with a 1-hour expiry; the subject is the user id.

use crate::{
    app::AppState,
    error::{validation_errors, ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskdash_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (no complexity rules are enforced)
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Human-readable confirmation
    pub message: String,

    /// Public fields of the created user
    pub user: User,
}

/// Login request
///
/// Fields are optional so that a missing field maps to a 400 rather than a
/// body-deserialization failure.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: Option<String>,

    /// Password
    pub password: Option<String>,
}

/// Public user fields returned on login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginUser {
    /// User ID
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Display name
    pub username: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Always true on a 200
    pub success: bool,

    /// Human-readable confirmation
    pub message: String,

    /// Signed bearer token (1-hour expiry)
    pub token: String,

    /// Public user fields
    pub user: LoginUser,
}

/// Register a new user
///
/// Hashes the password with Argon2id and persists the account.
///
/// # Errors
///
/// - `409 Conflict`: email already registered
/// - `422 Unprocessable Entity`: validation failed
/// - `500 Internal Server Error`: hashing or database failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate().map_err(validation_errors)?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User successfully created".to_string(),
            user,
        }),
    ))
}

/// Login endpoint
///
/// Looks the user up by email, verifies the password hash, and issues a
/// signed token carrying the user id as subject.
///
/// # Errors
///
/// - `400 Bad Request`: email or password missing
/// - `404 Not Found`: no account with that email
/// - `401 Unauthorized`: wrong password
/// - `500 Internal Server Error`: hashing or database failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (email, password) = match (req.email, req.password) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(ApiError::BadRequest(
                "Email and password are required".to_string(),
            ))
        }
    };

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let valid = password::verify_password(&password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid password".to_string()));
    }

    let claims = jwt::Claims::new(user.id, &user.email);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        success: true,
        message: "Successfully logged in".to_string(),
        token,
        user: LoginUser {
            id: user.id,
            email: user.email,
            username: user.username,
        },
    }))
}
