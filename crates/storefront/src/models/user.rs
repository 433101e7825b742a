//! User domain types.

use secrecy::SecretString;

use flowershop_core::{Email, UserId};

/// A registered shop user.
///
/// The password hash is wrapped in `SecretString` so it never shows up in
/// `Debug` output or logs.
#[derive(Debug)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email (unique).
    pub email: Email,
    /// Display name.
    pub full_name: String,
    /// Argon2id PHC string.
    pub password_hash: SecretString,
    /// Profile photo, usually an inline `data:` URL.
    pub photo_url: Option<String>,
}
