//! Authentication route handlers.
//!
//! Signup, password login and logout. The logged-in user is kept in the
//! server-side session; the browser only sees the opaque session cookie.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{FromRequest, Multipart, Request, State},
    http::{HeaderMap, header::CONTENT_TYPE},
    response::{IntoResponse, Redirect},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use flowershop_core::UserId;

use crate::db::{DbConn, RepositoryError};
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::extract::Form;
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup fields, from either a URL-encoded or a multipart body.
#[derive(Default, Deserialize)]
struct SignupForm {
    email: Option<String>,
    full_name: Option<String>,
    password: Option<String>,
    #[serde(skip)]
    photo_url: Option<String>,
}

/// Signup response body.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user_id: UserId,
}

// =============================================================================
// Templates
// =============================================================================

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate;

// =============================================================================
// Signup
// =============================================================================

/// Display the signup page.
pub async fn signup_page() -> impl IntoResponse {
    SignupTemplate
}

/// Handle the signup form.
///
/// Accepts `application/x-www-form-urlencoded` or `multipart/form-data`; only
/// the multipart form can carry a photo, which is stored inline as a `data:`
/// URL. An empty file input counts as no photo.
///
/// The body is read in full before a database connection is taken.
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<SignupResponse>> {
    let form = if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, &state).await?;
        read_signup_form(multipart).await?
    } else {
        let Form(form) = Form::<SignupForm>::from_request(request, &state).await?;
        form
    };

    let email = form.email.ok_or_else(|| missing("email"))?;
    let full_name = form.full_name.ok_or_else(|| missing("full_name"))?;
    let password = form.password.ok_or_else(|| missing("password"))?;

    let mut conn = state
        .db()
        .acquire_session()
        .await
        .map_err(RepositoryError::from)?;
    let user_id = AuthService::new(&mut conn)
        .register(&email, &full_name, &password, form.photo_url.as_deref())
        .await?;

    tracing::info!(%user_id, "User signed up");
    Ok(Json(SignupResponse { user_id }))
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

async fn read_signup_form(mut multipart: Multipart) -> Result<SignupForm> {
    let mut form = SignupForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "email" => form.email = Some(field.text().await?),
            "full_name" => form.full_name = Some(field.text().await?),
            "password" => form.password = Some(field.text().await?),
            "photo" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.photo_url = Some(photo_data_url(&content_type, &bytes));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Inline an uploaded image as `data:{content_type};base64,{payload}`.
#[must_use]
pub fn photo_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("missing field: {field}"))
}

// =============================================================================
// Login / Logout
// =============================================================================

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate
}

/// Handle login form submission.
///
/// On success the session ID is cycled, the user ID stored, and the client
/// redirected (303) to `/profile`. On failure nothing is written to the
/// session, so no session cookie is issued.
#[instrument(skip_all)]
pub async fn login(
    session: Session,
    mut conn: DbConn,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let user = AuthService::new(&mut conn)
        .login(&form.email, &form.password)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Login failed"))?;

    set_current_user(&session, &CurrentUser { id: user.id }).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Redirect::to("/profile"))
}

/// Handle logout.
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/login"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_multipart() {
        let mut headers = HeaderMap::new();
        assert!(!is_multipart(&headers));

        headers.insert(
            CONTENT_TYPE,
            "application/x-www-form-urlencoded".parse().unwrap(),
        );
        assert!(!is_multipart(&headers));

        headers.insert(
            CONTENT_TYPE,
            "multipart/form-data; boundary=xyz".parse().unwrap(),
        );
        assert!(is_multipart(&headers));
    }

    #[test]
    fn test_photo_data_url() {
        assert_eq!(
            photo_data_url("image/png", b"\x89PNG"),
            "data:image/png;base64,iVBORw=="
        );
    }
}
