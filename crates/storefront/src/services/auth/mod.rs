//! Authentication service.
//!
//! Password signup and login. Hashes are Argon2id PHC strings.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::LazyLock;

use secrecy::ExposeSecret;
use sqlx::SqliteConnection;

use flowershop_core::{Email, UserId};

use crate::db::{RepositoryError, UserRepository};
use crate::models::User;

/// Verified against on a login miss so unknown emails cost the same Argon2
/// work as wrong passwords.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("flowershop-dummy-password").ok());

/// Authentication service over a request-scoped connection.
pub struct AuthService<'c> {
    users: UserRepository<'c>,
}

impl<'c> AuthService<'c> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(conn: &'c mut SqliteConnection) -> Self {
        Self {
            users: UserRepository::new(conn),
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &mut self,
        email: &str,
        full_name: &str,
        password: &str,
        photo_url: Option<&str>,
    ) -> Result<UserId, AuthError> {
        let email = Email::parse(email)?;
        let password_hash = hash_password(password)?;

        self.users
            .create(&email, full_name, &password_hash, photo_url)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })
    }

    /// Login with email and password.
    ///
    /// An unparsable email is reported the same way as an unknown one, and
    /// both still run a password verification.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = match Email::parse(email) {
            Ok(email) => self.users.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            reject_unknown_user(password);
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, user.password_hash.expose_secret())?;

        Ok(user)
    }
}

/// Hash a password with Argon2id and a random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

fn reject_unknown_user(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}

fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
