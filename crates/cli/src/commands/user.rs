//! User management commands.
//!
//! ```bash
//! fs-cli user create -e ann@example.com -n "Ann Lee" -p petals
//! ```

use flowershop_core::UserId;
use flowershop_storefront::services::auth::{AuthError, AuthService};

use super::{CommandError, open_database};

/// Errors that can occur during user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Create a user with a hashed password.
///
/// # Errors
///
/// Returns `UserError::Auth` for an invalid or duplicate email.
pub async fn create(email: &str, full_name: &str, password: &str) -> Result<UserId, UserError> {
    let db = open_database().await?;
    let mut conn = db
        .acquire_session()
        .await
        .map_err(CommandError::from)?;

    let id = AuthService::new(&mut conn)
        .register(email, full_name, password, None)
        .await?;

    tracing::info!(user_id = %id, email, "User created");
    Ok(id)
}
