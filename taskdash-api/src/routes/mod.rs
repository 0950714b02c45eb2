/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login)
/// - `tasks`: Task CRUD endpoints with ownership enforcement

pub mod auth;
pub mod health;
pub mod tasks;
