//! Purchase history types.

use serde::Serialize;
use sqlx::FromRow;

use flowershop_core::{FlowerId, Price};

/// One purchased unit joined with the flower it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct PurchasedFlower {
    pub flower_id: FlowerId,
    pub name: String,
    pub price: Price,
}
