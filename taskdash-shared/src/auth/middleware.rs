/// Authentication context for Axum handlers
///
/// The API server validates the bearer token in a middleware layer and, on
/// success, inserts an [`AuthContext`] into the request extensions. Handlers
/// extract it with Axum's `Extension` extractor and use `user_id` as the
/// token subject for ownership checks.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskdash_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
/// ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::Claims;

/// Authentication context added to request extensions after a token passes
/// validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID (the token subject)
    pub user_id: Uuid,

    /// Email carried in the token
    pub email: String,
}

impl AuthContext {
    /// Creates an auth context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email.clone(),
        }
    }

    /// Checks whether this context is allowed to act on resources owned by
    /// `owner`. Ownership is strict equality with the token subject.
    pub fn owns(&self, owner: Uuid) -> bool {
        self.user_id == owner
    }
}

/// Errors raised while extracting credentials from a request
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header was present
    #[error("Missing credentials")]
    MissingCredentials,

    /// Authorization header was present but not a Bearer token
    #[error("Invalid authorization format: {0}")]
    InvalidFormat(String),

    /// Token failed validation
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
