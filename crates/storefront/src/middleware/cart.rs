//! The `cart` cookie.
//!
//! The cart lives entirely on the client as a plain cookie holding
//! comma-joined flower IDs (`3,3,7`). It is not signed; any tampering
//! shows up as a malformed cart (400) or as IDs that no longer resolve.

use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts},
};
use tower_sessions::cookie::{Cookie, SameSite};

use flowershop_core::Cart;

use crate::error::AppError;

/// Cart cookie name.
pub const CART_COOKIE_NAME: &str = "cart";

/// Extractor for the cart carried by the request.
///
/// A missing or empty cookie is an empty cart. A cookie with a non-numeric
/// entry is rejected with 400.
pub struct CartCookie(pub Cart);

impl<S> FromRequestParts<S> for CartCookie
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == CART_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned());

        match value {
            Some(v) => Ok(Self(Cart::parse(&v)?)),
            None => Ok(Self(Cart::new())),
        }
    }
}

/// `Set-Cookie` value storing the given cart.
#[must_use]
pub fn cart_cookie(cart: &Cart, secure: bool) -> Cookie<'static> {
    Cookie::build((CART_COOKIE_NAME, cart.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// `Set-Cookie` value deleting the cart.
#[must_use]
pub fn cart_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((CART_COOKIE_NAME, "")).path("/").build();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use flowershop_core::FlowerId;

    use super::*;

    async fn extract(cookie_header: Option<&str>) -> Result<Cart, AppError> {
        let mut builder = Request::builder().uri("/cart/items");
        if let Some(header) = cookie_header {
            builder = builder.header(COOKIE, header);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        CartCookie::from_request_parts(&mut parts, &())
            .await
            .map(|CartCookie(cart)| cart)
    }

    #[tokio::test]
    async fn test_missing_cookie_is_empty_cart() {
        assert!(extract(None).await.unwrap().is_empty());
        assert!(extract(Some("fs_session=abc")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reads_cart_among_other_cookies() {
        let cart = extract(Some("fs_session=abc; cart=3,3")).await.unwrap();
        assert_eq!(cart.to_string(), "3,3");
    }

    #[tokio::test]
    async fn test_malformed_cart_is_rejected() {
        let err = extract(Some("cart=3,rose")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_cart_cookie_attributes() {
        let cart: Cart = [FlowerId::new(3), FlowerId::new(3)].into_iter().collect();
        let cookie = cart_cookie(&cart, false);
        assert_eq!(cookie.name(), "cart");
        assert_eq!(cookie.value(), "3,3");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
    }

    #[test]
    fn test_removal_cookie_expires() {
        let cookie = cart_removal_cookie();
        assert_eq!(cookie.value(), "");
        assert!(cookie.max_age().is_some_and(|age| age.is_zero()));
    }
}
