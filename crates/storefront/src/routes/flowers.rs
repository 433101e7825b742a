//! Flower inventory route handlers.
//!
//! The list is an HTML page; the mutating endpoints answer with JSON.

use askama::Template;
use askama_web::WebTemplate;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use flowershop_core::{FlowerId, Price};

use crate::db::{DbConn, FlowerRepository};
use crate::error::{AppError, Result};
use crate::extract::{Form, PartialForm, Path};
use crate::filters;
use crate::models::{Flower, FlowerPatch};

// =============================================================================
// Form Types
// =============================================================================

/// New flower form data. Numbers arrive as text and are validated here.
#[derive(Debug, Deserialize)]
pub struct CreateFlowerForm {
    pub name: String,
    pub quantity: String,
    pub price: String,
}

/// Partial update form data. Absent and blank fields are left unchanged.
///
/// The name is trimmed the same way as on create.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFlowerForm {
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
}

impl UpdateFlowerForm {
    /// Convert into a [`FlowerPatch`], treating blank fields as absent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if quantity or price does not parse.
    pub fn into_patch(self) -> Result<FlowerPatch> {
        Ok(FlowerPatch {
            name: non_blank(self.name).map(|n| n.trim().to_owned()),
            quantity: non_blank(self.quantity)
                .map(|q| parse_quantity(&q))
                .transpose()?,
            price: non_blank(self.price)
                .map(|p| parse_price(&p))
                .transpose()?,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_quantity(value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid quantity: {value:?}")))
}

fn parse_price(value: &str) -> Result<Price> {
    Price::parse(value).map_err(|e| AppError::BadRequest(e.to_string()))
}

// =============================================================================
// Response Types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct CreatedFlower {
    pub flower_id: FlowerId,
}

#[derive(Debug, Serialize)]
pub struct UpdatedFlower {
    pub flower: Flower,
}

#[derive(Debug, Serialize)]
pub struct DeletedFlower {
    pub deleted_flower_id: FlowerId,
}

/// Flower list page template.
#[derive(Template, WebTemplate)]
#[template(path = "flowers/index.html")]
pub struct FlowersTemplate {
    pub flowers: Vec<Flower>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display all flowers.
#[instrument(skip_all)]
pub async fn index(mut conn: DbConn) -> Result<FlowersTemplate> {
    let flowers = FlowerRepository::new(&mut conn).list_all().await?;
    Ok(FlowersTemplate { flowers })
}

/// Add a flower to the inventory.
#[instrument(skip_all)]
pub async fn create(
    mut conn: DbConn,
    Form(form): Form<CreateFlowerForm>,
) -> Result<Json<CreatedFlower>> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_owned()));
    }
    let quantity = parse_quantity(&form.quantity)?;
    let price = parse_price(&form.price)?;

    let flower_id = FlowerRepository::new(&mut conn)
        .create(name, quantity, price)
        .await?;

    tracing::info!(%flower_id, "Flower created");
    Ok(Json(CreatedFlower { flower_id }))
}

/// Update some fields of a flower.
#[instrument(skip_all)]
pub async fn update(
    Path(id): Path<FlowerId>,
    mut conn: DbConn,
    PartialForm(form): PartialForm<UpdateFlowerForm>,
) -> Result<Json<UpdatedFlower>> {
    let patch = form.into_patch()?;

    let flower = FlowerRepository::new(&mut conn)
        .update(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Flower not found".to_owned()))?;

    Ok(Json(UpdatedFlower { flower }))
}

/// Remove a flower from the inventory.
#[instrument(skip_all)]
pub async fn delete(Path(id): Path<FlowerId>, mut conn: DbConn) -> Result<Json<DeletedFlower>> {
    let deleted_flower_id = FlowerRepository::new(&mut conn)
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Flower not found".to_owned()))?;

    tracing::info!(flower_id = %deleted_flower_id, "Flower deleted");
    Ok(Json(DeletedFlower { deleted_flower_id }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_absent() {
        let form = UpdateFlowerForm {
            name: Some("  ".to_owned()),
            quantity: Some(String::new()),
            price: None,
        };
        assert!(form.into_patch().unwrap().is_empty());
    }

    #[test]
    fn test_patch_trims_name() {
        let form = UpdateFlowerForm {
            name: Some("  Tulip ".to_owned()),
            ..UpdateFlowerForm::default()
        };
        assert_eq!(form.into_patch().unwrap().name.as_deref(), Some("Tulip"));
    }

    #[test]
    fn test_patch_parses_numbers() {
        let form = UpdateFlowerForm {
            quantity: Some(" 5 ".to_owned()),
            price: Some("2.5".to_owned()),
            ..UpdateFlowerForm::default()
        };
        let patch = form.into_patch().unwrap();
        assert_eq!(patch.quantity, Some(5));
        assert_eq!(patch.price, Some(Price::parse("2.5").unwrap()));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_patch_rejects_bad_numbers() {
        let form = UpdateFlowerForm {
            quantity: Some("lots".to_owned()),
            ..UpdateFlowerForm::default()
        };
        assert!(matches!(form.into_patch(), Err(AppError::BadRequest(_))));

        let form = UpdateFlowerForm {
            price: Some("cheap".to_owned()),
            ..UpdateFlowerForm::default()
        };
        assert!(matches!(form.into_patch(), Err(AppError::BadRequest(_))));
    }
}
