//! Session-related types.
//!
//! Types stored in the server-side session for authentication state.

use serde::{Deserialize, Serialize};

use flowershop_core::UserId;

/// Session-stored user identity.
///
/// Only the ID is kept; everything else is re-read from the database so a
/// stale session never shows stale profile data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
