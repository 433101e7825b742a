//! Cart route handlers.
//!
//! The cart is the `cart` cookie; nothing about it is stored server-side
//! until checkout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use flowershop_core::{FlowerId, Price};

use crate::db::{DbConn, FlowerRepository};
use crate::error::{AppError, Result};
use crate::extract::Form;
use crate::filters;
use crate::middleware::{CartCookie, cart_cookie};
use crate::state::AppState;

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub flower_id: String,
}

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: FlowerId,
    pub name: String,
    pub price: Price,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub items: Vec<CartItemView>,
    pub total: Price,
}

/// Append one unit of a flower to the cart cookie.
///
/// The flower is not looked up; an ID that does not resolve is simply
/// skipped when the cart is displayed.
#[instrument(skip_all)]
pub async fn add(
    State(state): State<AppState>,
    CartCookie(mut cart): CartCookie,
    Form(form): Form<AddToCartForm>,
) -> Result<impl IntoResponse> {
    let flower_id: FlowerId = form
        .flower_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid flower_id: {:?}", form.flower_id)))?;

    cart.push(flower_id);
    tracing::debug!(%flower_id, items = cart.len(), "Added to cart");

    let cookie = cart_cookie(&cart, state.config().secure_cookies());
    Ok((
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Json(json!({ "message": "Flower added to cart" })),
    ))
}

/// Display the cart with a running total.
///
/// Each entry is looked up separately, so duplicates show up as separate
/// lines and count toward the total once per entry.
#[instrument(skip_all)]
pub async fn show(CartCookie(cart): CartCookie, mut conn: DbConn) -> Result<CartTemplate> {
    let mut flowers = FlowerRepository::new(&mut conn);
    let mut items = Vec::with_capacity(cart.len());

    for flower_id in cart.iter() {
        if let Some(flower) = flowers.find_by_id(flower_id).await? {
            items.push(CartItemView {
                id: flower.id,
                name: flower.name,
                price: flower.price,
            });
        }
    }

    let total = items.iter().map(|item| item.price).sum();
    Ok(CartTemplate { items, total })
}
