//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, capture errors)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded into the span)
//! 4. Session layer (tower-sessions with `SQLite` store)
//! 5. Security headers
//!
//! The cart is not middleware: handlers read it through the [`CartCookie`]
//! extractor and write it back with [`cart_cookie`].

pub mod auth;
pub mod cart;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{RequireAuth, clear_current_user, set_current_user};
pub use cart::{CART_COOKIE_NAME, CartCookie, cart_cookie, cart_removal_cookie};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{create_session_layer, create_session_store};
