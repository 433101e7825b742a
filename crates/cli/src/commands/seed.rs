//! Seed the flower inventory from a YAML file.
//!
//! ```yaml
//! flowers:
//!   - name: Rose
//!     quantity: 10
//!     price: 2.5
//!   - name: Tulip
//!     quantity: 4
//!     price: "1.75"
//! ```
//!
//! Prices may be written as numbers or strings; both go through the same
//! decimal parser the HTTP form uses.

use std::path::Path;

use serde::Deserialize;
use sqlx::{Connection, SqliteConnection};

use flowershop_core::{FlowerId, Price, PriceError};
use flowershop_storefront::db::{FlowerRepository, RepositoryError};

use super::{CommandError, open_database};

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid price for {name}: {source}")]
    Price { name: String, source: PriceError },

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Top-level layout of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub flowers: Vec<SeedFlower>,
}

/// One flower entry.
#[derive(Debug, Deserialize)]
pub struct SeedFlower {
    pub name: String,
    pub quantity: i64,
    pub price: serde_yaml::Value,
}

impl SeedFlower {
    fn price(&self) -> Result<Price, SeedError> {
        let raw = match &self.price {
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::String(s) => s.clone(),
            other => format!("{other:?}"),
        };
        Price::parse(&raw).map_err(|source| SeedError::Price {
            name: self.name.clone(),
            source,
        })
    }
}

/// Parse a seed file body.
///
/// # Errors
///
/// Returns `SeedError::Yaml` if the document does not match the layout.
pub fn parse(content: &str) -> Result<SeedFile, SeedError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Insert every flower in one transaction. Nothing is written if any entry
/// is invalid.
///
/// # Errors
///
/// Returns `SeedError` on an invalid price or a database failure.
pub async fn insert(
    conn: &mut SqliteConnection,
    seed: &SeedFile,
) -> Result<Vec<FlowerId>, SeedError> {
    let mut tx = conn.begin().await.map_err(RepositoryError::from)?;
    let mut ids = Vec::with_capacity(seed.flowers.len());
    {
        let mut flowers = FlowerRepository::new(&mut tx);
        for flower in &seed.flowers {
            let price = flower.price()?;
            ids.push(flowers.create(&flower.name, flower.quantity, price).await?);
        }
    }
    tx.commit().await.map_err(RepositoryError::from)?;
    Ok(ids)
}

/// Seed flowers from a YAML file into the configured database.
///
/// # Errors
///
/// Returns `SeedError` if the file cannot be read or parsed, or the database
/// rejects the inserts.
pub async fn flowers(path: &Path) -> Result<(), SeedError> {
    tracing::info!(path = %path.display(), "Loading flowers from file");
    let content = tokio::fs::read_to_string(path).await?;
    let seed = parse(&content)?;
    tracing::info!(flowers = seed.flowers.len(), "Parsed seed file");

    let db = open_database().await?;
    let mut conn = db
        .acquire_session()
        .await
        .map_err(|e| SeedError::Command(e.into()))?;

    let ids = insert(&mut conn, &seed).await?;
    tracing::info!(inserted = ids.len(), "Seeding complete");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use flowershop_storefront::db::Database;

    use super::*;

    const SEED: &str = r#"
flowers:
  - name: Rose
    quantity: 10
    price: 2.5
  - name: Tulip
    quantity: 4
    price: "1.75"
"#;

    #[test]
    fn test_parse() {
        let seed = parse(SEED).unwrap();
        assert_eq!(seed.flowers.len(), 2);
        assert_eq!(seed.flowers[0].price().unwrap(), Price::parse("2.5").unwrap());
        assert_eq!(seed.flowers[1].price().unwrap(), Price::parse("1.75").unwrap());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(parse("flowers:\n  - name: Rose\n").is_err());
    }

    #[tokio::test]
    async fn test_insert() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire_session().await.unwrap();

        let ids = insert(&mut conn, &parse(SEED).unwrap()).await.unwrap();
        assert_eq!(ids.len(), 2);

        let all = FlowerRepository::new(&mut conn).list_all().await.unwrap();
        assert_eq!(all[1].name, "Tulip");
        assert_eq!(all[1].quantity, 4);
    }

    #[tokio::test]
    async fn test_bad_price_writes_nothing() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire_session().await.unwrap();
        let seed = parse("flowers:\n  - name: Rose\n    quantity: 1\n    price: 2\n  - name: Weed\n    quantity: 1\n    price: free\n").unwrap();

        let err = insert(&mut conn, &seed).await.unwrap_err();
        assert!(matches!(err, SeedError::Price { ref name, .. } if name == "Weed"));
        assert!(FlowerRepository::new(&mut conn).list_all().await.unwrap().is_empty());
    }
}
