//! User repository for database operations.

use secrecy::SecretString;
use sqlx::{FromRow, SqliteConnection};

use flowershop_core::{Email, UserId};

use super::{RepositoryError, conflict_on_unique};
use crate::models::User;

#[derive(FromRow)]
struct UserRow {
    id: UserId,
    email: String,
    full_name: String,
    password_hash: String,
    photo_url: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            email,
            full_name: row.full_name,
            password_hash: SecretString::from(row.password_hash),
            photo_url: row.photo_url,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> UserRepository<'c> {
    /// Create a new user repository on a borrowed connection.
    #[must_use]
    pub const fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert a user and return its new ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &mut self,
        email: &Email,
        full_name: &str,
        password_hash: &str,
        photo_url: Option<&str>,
    ) -> Result<UserId, RepositoryError> {
        let id = sqlx::query_scalar::<_, UserId>(
            r"
            INSERT INTO users (email, full_name, password_hash, photo_url)
            VALUES (?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(email)
        .bind(full_name)
        .bind(password_hash)
        .bind(photo_url)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(conflict_on_unique("email already exists"))?;

        Ok(id)
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database is invalid.
    pub async fn find_by_email(&mut self, email: &Email) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, full_name, password_hash, photo_url
            FROM users
            WHERE email = ?
            ",
        )
        .bind(email)
        .fetch_optional(&mut *self.conn)
        .await?
        .map(User::try_from)
        .transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database is invalid.
    pub async fn find_by_id(&mut self, id: UserId) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, full_name, password_hash, photo_url
            FROM users
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .map(User::try_from)
        .transpose()
    }
}
