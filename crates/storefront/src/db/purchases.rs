//! Purchase history repository.

use sqlx::SqliteConnection;

use flowershop_core::{FlowerId, PurchaseId, UserId};

use super::RepositoryError;
use crate::models::PurchasedFlower;

/// Repository for the `purchases` table.
pub struct PurchaseRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> PurchaseRepository<'c> {
    #[must_use]
    pub const fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Record one purchased unit.
    ///
    /// The flower is not checked for existence and stock is not decremented.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add(
        &mut self,
        user_id: UserId,
        flower_id: FlowerId,
    ) -> Result<PurchaseId, RepositoryError> {
        let id = sqlx::query_scalar::<_, PurchaseId>(
            "INSERT INTO purchases (user_id, flower_id) VALUES (?, ?) RETURNING id",
        )
        .bind(user_id)
        .bind(flower_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    /// Purchased flowers for a user, one entry per unit, oldest first.
    ///
    /// Purchases whose flower has since been deleted are omitted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(
        &mut self,
        user_id: UserId,
    ) -> Result<Vec<PurchasedFlower>, RepositoryError> {
        let rows = sqlx::query_as::<_, PurchasedFlower>(
            r"
            SELECT f.id AS flower_id, f.name, f.price
            FROM purchases p
            INNER JOIN flowers f ON f.id = p.flower_id
            WHERE p.user_id = ?
            ORDER BY p.id
            ",
        )
        .bind(user_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }
}
