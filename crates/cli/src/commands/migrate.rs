//! Database migration command.
//!
//! ```bash
//! fs-cli migrate
//! ```
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded in the
//! storefront library. Running them twice is harmless.

use super::{CommandError, open_database};

/// Create any missing tables.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be opened or migrated.
pub async fn run() -> Result<(), CommandError> {
    tracing::info!("Running migrations...");
    open_database().await?;
    tracing::info!("Migrations complete");
    Ok(())
}
