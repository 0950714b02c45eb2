/// Database layer for TaskDash
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with a health check
/// - `migrations`: Migration runner and dev-time database bootstrap
///
/// Models live in the `models` module at the crate root.

pub mod migrations;
pub mod pool;
