/// Database models for TaskDash
///
/// # Models
///
/// - `user`: User accounts (registration, login lookup)
/// - `task`: Tasks owned by a user, with status/priority and due date
///
/// # Example
///
/// ```no_run
/// use taskdash_shared::models::user::{CreateUser, User};
/// use taskdash_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "alice".to_string(),
///         email: "alice@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
