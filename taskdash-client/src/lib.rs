//! # TaskDash Dashboard Client
//!
//! Client library for the TaskDash API: a typed HTTP client that keeps a
//! local copy of the user's task list and the summary statistics derived
//! from it (total, completed, pending, productivity).
//!
//! The client is deliberately non-optimistic: every mutation re-fetches the
//! full task list from the server and re-derives the stats, so the local
//! view never drifts from what the server holds.
//!
//! A 401/403 from any endpoint clears the session and surfaces as
//! [`ClientError::SessionExpired`]; the caller is expected to take the user
//! back to the login screen.
//!
//! ## Example
//!
//! ```no_run
//! use taskdash_client::DashboardClient;
//!
//! # async fn example() -> Result<(), taskdash_client::ClientError> {
//! let mut client = DashboardClient::new("http://localhost:3001");
//!
//! client.login("a@x.com", "p").await?;
//! client.refresh().await?;
//!
//! println!("productivity: {}%", client.stats().productivity);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod session;
pub mod stats;

pub use client::{DashboardClient, NewTask};
pub use error::ClientError;
pub use session::Session;
pub use stats::DashboardStats;
