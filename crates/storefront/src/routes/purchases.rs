//! Checkout and purchase history handlers.
//!
//! Both require a logged-in user.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde_json::json;
use sqlx::Connection;
use tracing::instrument;

use crate::db::{DbConn, PurchaseRepository, RepositoryError};
use crate::error::Result;
use crate::filters;
use crate::middleware::{CartCookie, RequireAuth, cart_removal_cookie};
use crate::models::PurchasedFlower;

/// Purchase history page template.
#[derive(Template, WebTemplate)]
#[template(path = "purchases/index.html")]
pub struct PurchasesTemplate {
    pub purchases: Vec<PurchasedFlower>,
}

/// Turn the cart into purchase rows and clear it.
///
/// One row is written per cart entry, duplicates included, all in a single
/// transaction. An empty cart is a successful no-op.
#[instrument(skip_all)]
pub async fn checkout(
    RequireAuth(user): RequireAuth,
    CartCookie(cart): CartCookie,
    mut conn: DbConn,
) -> Result<Response> {
    if cart.is_empty() {
        return Ok(Json(json!({ "message": "Cart is empty" })).into_response());
    }

    let mut tx = conn.begin().await.map_err(RepositoryError::from)?;
    {
        let mut purchases = PurchaseRepository::new(&mut tx);
        for flower_id in cart.iter() {
            purchases.add(user.id, flower_id).await?;
        }
    }
    tx.commit().await.map_err(RepositoryError::from)?;

    tracing::info!(items = cart.len(), "Checkout complete");
    Ok((
        AppendHeaders([(SET_COOKIE, cart_removal_cookie().to_string())]),
        Json(json!({ "message": "Purchase successful" })),
    )
        .into_response())
}

/// Display the logged-in user's purchase history.
#[instrument(skip_all)]
pub async fn history(
    RequireAuth(user): RequireAuth,
    mut conn: DbConn,
) -> Result<PurchasesTemplate> {
    let purchases = PurchaseRepository::new(&mut conn)
        .list_by_user(user.id)
        .await?;

    Ok(PurchasesTemplate { purchases })
}
