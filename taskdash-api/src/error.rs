/// Error handling for the API server
///
/// A unified error type that maps to HTTP responses. Handlers return
/// `Result<T, ApiError>` which converts to the appropriate status code:
///
/// - 400 bad request (missing/invalid input)
/// - 401 unauthenticated (missing, invalid or expired token)
/// - 403 forbidden (ownership violation)
/// - 404 not found
/// - 409 conflict (duplicate email)
/// - 422 validation errors
/// - 500 internal (details logged, generic message returned)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403) - ownership violation
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - e.g., duplicate email
    Conflict(String),

    /// Unprocessable entity (422) - request body validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "forbidden")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Unique constraint violations on email surface as conflicts
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email already exists".to_string());
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert auth extraction errors to API errors
impl From<taskdash_shared::auth::middleware::AuthError> for ApiError {
    fn from(err: taskdash_shared::auth::middleware::AuthError) -> Self {
        use taskdash_shared::auth::middleware::AuthError;
        // Every credential failure is a 401: a malformed header is no more
        // authenticated than a missing one.
        match err {
            AuthError::MissingCredentials => ApiError::Unauthorized("No token found".to_string()),
            AuthError::InvalidFormat(msg) => ApiError::Unauthorized(msg),
            AuthError::InvalidToken(msg) => ApiError::Unauthorized(msg),
        }
    }
}

/// Convert password errors to API errors
impl From<taskdash_shared::auth::password::PasswordError> for ApiError {
    fn from(err: taskdash_shared::auth::password::PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Maps request-body validation failures onto a 422 error with one detail
/// entry per failed field rule.
pub fn validation_errors(e: validator::ValidationErrors) -> ApiError {
    let errors: Vec<ValidationErrorDetail> = e
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    ApiError::ValidationError(errors)
}

/// Convert JWT errors to API errors
impl From<taskdash_shared::auth::jwt::JwtError> for ApiError {
    fn from(err: taskdash_shared::auth::jwt::JwtError) -> Self {
        use taskdash_shared::auth::jwt::JwtError;
        match err {
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            JwtError::InvalidIssuer => ApiError::Unauthorized("Invalid token issuer".to_string()),
            _ => ApiError::Unauthorized(format!("Invalid token: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Task not found".to_string());
        assert_eq!(err.to_string(), "Not found: Task not found");
    }

    #[tokio::test]
    async fn test_status_code_mapping() {
        assert_eq!(
            status_of(ApiError::BadRequest("x".into())).await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::Unauthorized("x".into())).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ApiError::Forbidden("x".into())).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(ApiError::NotFound("x".into())).await,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::Conflict("x".into())).await,
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ApiError::InternalError("x".into())).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_auth_error_mapping_is_always_401() {
        use taskdash_shared::auth::middleware::AuthError;

        let err: ApiError = AuthError::MissingCredentials.into();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);

        // A present-but-malformed header is still an authentication failure.
        let err: ApiError = AuthError::InvalidFormat("Expected Bearer token".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);

        let err: ApiError = AuthError::InvalidToken("bad signature".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_jwt_error_mapping() {
        use taskdash_shared::auth::jwt::JwtError;

        let err: ApiError = JwtError::Expired.into();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);

        let err: ApiError = JwtError::ValidationError("bad signature".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validation_errors_helper() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("title", validator::ValidationError::new("length"));

        let err = validation_errors(errors);
        match &err {
            ApiError::ValidationError(details) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "title");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_validation_error() {
        let errors = vec![ValidationErrorDetail {
            field: "email".to_string(),
            message: "Invalid email format".to_string(),
        }];

        let err = ApiError::ValidationError(errors);
        assert_eq!(err.to_string(), "Validation failed: 1 errors");
    }
}
