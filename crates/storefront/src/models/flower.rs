//! Flower inventory types.

use serde::Serialize;
use sqlx::FromRow;

use flowershop_core::{FlowerId, Price};

/// A flower in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Flower {
    pub id: FlowerId,
    pub name: String,
    /// Units on hand. Not decremented by purchases.
    pub quantity: i64,
    pub price: Price,
}

/// Partial update for a [`Flower`].
///
/// `None` means "leave unchanged". The columns are non-nullable, so there is
/// no way (and no need) to express "clear this field".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowerPatch {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Price>,
}

impl FlowerPatch {
    /// Whether the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none() && self.price.is_none()
    }
}
