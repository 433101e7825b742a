//! Account route handlers.
//!
//! These routes require authentication.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::db::{DbConn, UserRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/profile.html")]
pub struct ProfileTemplate {
    pub full_name: String,
    pub email: String,
    pub photo_url: Option<String>,
}

/// Display the logged-in user's profile.
///
/// A session pointing at a user that no longer exists yields 404.
#[instrument(skip_all)]
pub async fn profile(
    RequireAuth(current_user): RequireAuth,
    mut conn: DbConn,
) -> Result<ProfileTemplate> {
    let user = UserRepository::new(&mut conn)
        .find_by_id(current_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

    Ok(ProfileTemplate {
        full_name: user.full_name,
        email: user.email.to_string(),
        photo_url: user.photo_url,
    })
}
