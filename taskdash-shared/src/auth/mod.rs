/// Authentication utilities
///
/// This module provides the authentication primitives for TaskDash:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT issuance and validation (HS256, 1-hour expiry)
/// - [`middleware`]: `AuthContext` carried through request extensions
///
/// # Example
///
/// ```
/// use taskdash_shared::auth::password::{hash_password, verify_password};
/// use taskdash_shared::auth::jwt::{create_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), "user@example.com");
/// let token = create_token(&claims, "secret-key")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
