/// Login session state
///
/// Held by the client after a successful login, the moral equivalent of the
/// browser dashboard's token + userId in local storage. Cleared on logout
/// and whenever the server answers 401/403.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token returned by `POST /login`
    pub token: String,

    /// User id embedded in the token subject
    pub user_id: Uuid,

    /// Email of the logged-in user
    pub email: String,

    /// Display name of the logged-in user
    pub username: String,
}
