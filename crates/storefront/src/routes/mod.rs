//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (database)
//!
//! # Auth
//! GET    /signup              - Signup page
//! POST   /signup              - Create account (form or multipart with photo)
//! GET    /login               - Login page
//! POST   /login               - Login action, redirects to /profile
//! POST   /logout              - Logout action
//! GET    /profile             - Profile page (requires auth)
//!
//! # Inventory
//! GET    /flowers             - Flower list
//! POST   /flowers             - Add a flower
//! PATCH  /flowers/{id}        - Partial update
//! DELETE /flowers/{id}        - Remove a flower
//!
//! # Cart (cookie)
//! POST   /cart/items          - Append a flower ID to the cart cookie
//! GET    /cart/items          - Cart page with total
//!
//! # Purchases (requires auth)
//! POST   /purchased           - Checkout the cart
//! GET    /purchased           - Purchase history
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod flowers;
pub mod health;
pub mod purchases;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, patch, post},
};
use sentry_tower::{NewSentryLayer, SentryHttpLayer};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Largest accepted signup body (profile photo included).
pub const SIGNUP_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/signup",
            get(auth::signup_page)
                .post(auth::signup)
                .layer(DefaultBodyLimit::max(SIGNUP_BODY_LIMIT)),
        )
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/profile", get(account::profile))
}

/// Create the flower inventory routes router.
pub fn flower_routes() -> Router<AppState> {
    Router::new()
        .route("/flowers", get(flowers::index).post(flowers::create))
        .route("/flowers/{id}", patch(flowers::update).delete(flowers::delete))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(auth_routes())
        .merge(flower_routes())
        .route("/cart/items", get(cart::show).post(cart::add))
        .route("/purchased", get(purchases::history).post(purchases::checkout))
}

/// Build the full application with its middleware stack.
pub fn app(state: AppState, session_layer: SessionManagerLayer<SqliteStore>) -> Router {
    let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(NewSentryLayer::new_from_top())
        .layer(SentryHttpLayer::new().enable_transaction())
}
