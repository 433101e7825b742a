//! Database access for the flower shop.
//!
//! # Database: SQLite (`flowers.db` by default)
//!
//! ## Tables
//!
//! - `users` - Site accounts (email, name, Argon2 hash, optional photo)
//! - `flowers` - Inventory (name, quantity, decimal price)
//! - `purchases` - One row per purchased unit (`user_id`, `flower_id`)
//! - `tower_sessions` - Login sessions (created by the session store)
//!
//! # Sessions
//!
//! Each request borrows one pooled connection through the [`DbConn`]
//! extractor. Repositories are built on that connection and the connection
//! goes back to the pool when the extractor value drops, whether the handler
//! succeeded or not.
//!
//! # Migrations
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded in the
//! binary. They run at startup and via:
//! ```bash
//! cargo run -p flowershop-cli -- migrate
//! ```

pub mod flowers;
pub mod purchases;
pub mod users;

use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use secrecy::{ExposeSecret, SecretString};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use thiserror::Error;

pub use flowers::FlowerRepository;
pub use purchases::PurchaseRepository;
pub use users::UserRepository;

use crate::error::AppError;
use crate::state::AppState;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map a unique-constraint violation to [`RepositoryError::Conflict`].
pub(crate) fn conflict_on_unique(message: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return RepositoryError::Conflict(message.to_owned());
        }
        RepositoryError::Database(e)
    }
}

/// The persistence provider: a connection pool bound to one SQLite database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool for the given connection string.
    ///
    /// File databases are created if missing. In-memory databases get a
    /// single connection that never idles out, because the data disappears
    /// with the last connection.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the URL is invalid or the database cannot be opened.
    pub async fn connect(database_url: &SecretString) -> Result<Self, sqlx::Error> {
        let url = database_url.expose_secret();
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(10));
        let pool_options = if is_in_memory(url) {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(Option::<Duration>::None)
                .max_lifetime(Option::<Duration>::None)
        } else {
            pool_options.max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        Ok(Self { pool })
    }

    /// Open a private in-memory database with the schema applied.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database cannot be opened or migrated.
    pub async fn in_memory() -> Result<Self, RepositoryError> {
        let db = Self::connect(&SecretString::from("sqlite::memory:")).await?;
        db.initialize_schema().await?;
        Ok(db)
    }

    /// Borrow a connection for the duration of one unit of work.
    ///
    /// The connection returns to the pool when the guard drops.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if no connection becomes available in time.
    pub async fn acquire_session(&self) -> Result<PoolConnection<Sqlite>, sqlx::Error> {
        self.pool.acquire().await
    }

    /// Create all tables that do not exist yet. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns `MigrateError` if a migration fails to apply.
    pub async fn initialize_schema(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Request-scoped database connection.
///
/// ```rust,ignore
/// async fn handler(mut conn: DbConn) -> Result<Json<Vec<Flower>>> {
///     Ok(Json(FlowerRepository::new(&mut conn).list_all().await?))
/// }
/// ```
pub struct DbConn(pub PoolConnection<Sqlite>);

impl Deref for DbConn {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromRequestParts<AppState> for DbConn {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let conn = state
            .db()
            .acquire_session()
            .await
            .map_err(RepositoryError::from)?;
        Ok(Self(conn))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in_memory() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite:file:shop?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://flowers.db?mode=rwc"));
    }

    #[tokio::test]
    async fn test_initialize_schema_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.initialize_schema().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'flowers', 'purchases') ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();
        assert_eq!(tables, vec!["flowers", "purchases", "users"]);
    }

    #[tokio::test]
    async fn test_acquired_session_returns_to_pool_on_drop() {
        let db = Database::in_memory().await.unwrap();
        {
            let _conn = db.acquire_session().await.unwrap();
            assert_eq!(db.pool().num_idle(), 0);
        }
        // The single in-memory connection must be reusable straight away.
        let mut conn = db.acquire_session().await.unwrap();
        let one: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(one, 1);
    }
}
