//! CLI subcommands.

pub mod migrate;
pub mod seed;
pub mod user;

use flowershop_storefront::config::{ConfigError, StorefrontConfig};
use flowershop_storefront::db::Database;

/// Errors shared by the subcommands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Open the configured database with the schema applied.
pub async fn open_database() -> Result<Database, CommandError> {
    let config = StorefrontConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;
    db.initialize_schema().await?;
    Ok(db)
}
