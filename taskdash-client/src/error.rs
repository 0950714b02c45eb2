/// Client error types

use serde::Deserialize;

/// Errors surfaced by the dashboard client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, bad TLS, ...)
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// No session: the caller must log in first
    #[error("Not logged in")]
    NotLoggedIn,

    /// The server rejected our credentials (401/403); the local session has
    /// been cleared and the user should be sent back to the login screen
    #[error("Session expired or rejected")]
    SessionExpired,

    /// Any other non-success response from the API
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the error body, if one could be parsed
        message: String,
    },
}

/// Error body shape returned by the API
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[allow(dead_code)]
    pub error: Option<String>,
    pub message: Option<String>,
}
