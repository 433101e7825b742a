//! Flower inventory repository.

use sqlx::SqliteConnection;

use flowershop_core::{FlowerId, Price};

use super::RepositoryError;
use crate::models::{Flower, FlowerPatch};

/// Repository for the `flowers` table.
pub struct FlowerRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> FlowerRepository<'c> {
    #[must_use]
    pub const fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert a flower and return its new ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &mut self,
        name: &str,
        quantity: i64,
        price: Price,
    ) -> Result<FlowerId, RepositoryError> {
        let id = sqlx::query_scalar::<_, FlowerId>(
            "INSERT INTO flowers (name, quantity, price) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(quantity)
        .bind(price)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    /// All flowers, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&mut self) -> Result<Vec<Flower>, RepositoryError> {
        let flowers = sqlx::query_as::<_, Flower>(
            "SELECT id, name, quantity, price FROM flowers ORDER BY id",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(flowers)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&mut self, id: FlowerId) -> Result<Option<Flower>, RepositoryError> {
        let flower = sqlx::query_as::<_, Flower>(
            "SELECT id, name, quantity, price FROM flowers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(flower)
    }

    /// Apply a partial update and return the stored result.
    ///
    /// Fields left as `None` keep their current value. An empty patch is a
    /// plain lookup. Returns `None` if no flower has this ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &mut self,
        id: FlowerId,
        patch: FlowerPatch,
    ) -> Result<Option<Flower>, RepositoryError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let flower = sqlx::query_as::<_, Flower>(
            r"
            UPDATE flowers
            SET name = COALESCE(?, name),
                quantity = COALESCE(?, quantity),
                price = COALESCE(?, price)
            WHERE id = ?
            RETURNING id, name, quantity, price
            ",
        )
        .bind(patch.name)
        .bind(patch.quantity)
        .bind(patch.price)
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(flower)
    }

    /// Delete a flower, returning its ID, or `None` if it did not exist.
    ///
    /// Purchases that reference the flower are left in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&mut self, id: FlowerId) -> Result<Option<FlowerId>, RepositoryError> {
        let deleted =
            sqlx::query_scalar::<_, FlowerId>("DELETE FROM flowers WHERE id = ? RETURNING id")
                .bind(id)
                .fetch_optional(&mut *self.conn)
                .await?;

        Ok(deleted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn price(s: &str) -> Price {
        Price::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire_session().await.unwrap();
        let mut flowers = FlowerRepository::new(&mut conn);

        assert!(flowers.list_all().await.unwrap().is_empty());

        let rose = flowers.create("Rose", 10, price("2.5")).await.unwrap();
        let tulip = flowers.create("Tulip", 4, price("1.75")).await.unwrap();

        let all = flowers.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, rose);
        assert_eq!(all[0].name, "Rose");
        assert_eq!(all[0].price, price("2.5"));
        assert_eq!(all[1].id, tulip);
        assert_eq!(all[1].quantity, 4);
    }

    #[tokio::test]
    async fn test_update_only_touches_given_fields() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire_session().await.unwrap();
        let mut flowers = FlowerRepository::new(&mut conn);
        let id = flowers.create("Rose", 10, price("2.5")).await.unwrap();

        let updated = flowers
            .update(
                id,
                FlowerPatch {
                    quantity: Some(7),
                    ..FlowerPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Rose");
        assert_eq!(updated.quantity, 7);
        assert_eq!(updated.price, price("2.5"));

        let renamed = flowers
            .update(
                id,
                FlowerPatch {
                    name: Some("Red Rose".to_owned()),
                    price: Some(price("3")),
                    ..FlowerPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Red Rose");
        assert_eq!(renamed.quantity, 7);
        assert_eq!(renamed.price, price("3"));
    }

    #[tokio::test]
    async fn test_empty_patch_returns_unchanged_row() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire_session().await.unwrap();
        let mut flowers = FlowerRepository::new(&mut conn);
        let id = flowers.create("Lily", 3, price("4")).await.unwrap();

        let same = flowers.update(id, FlowerPatch::default()).await.unwrap().unwrap();
        assert_eq!(same, flowers.find_by_id(id).await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_is_none() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire_session().await.unwrap();
        let mut flowers = FlowerRepository::new(&mut conn);

        let result = flowers
            .update(FlowerId::new(99), FlowerPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire_session().await.unwrap();
        let mut flowers = FlowerRepository::new(&mut conn);
        let id = flowers.create("Daisy", 1, price("0.5")).await.unwrap();

        assert_eq!(flowers.delete(id).await.unwrap(), Some(id));
        assert!(flowers.find_by_id(id).await.unwrap().is_none());
        assert!(flowers.list_all().await.unwrap().is_empty());
        assert_eq!(flowers.delete(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_deleted_id_is_not_reused() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire_session().await.unwrap();
        let mut flowers = FlowerRepository::new(&mut conn);

        let first = flowers.create("Daisy", 1, price("0.5")).await.unwrap();
        flowers.delete(first).await.unwrap();
        let second = flowers.create("Daisy", 1, price("0.5")).await.unwrap();
        assert!(second > first);
    }
}
