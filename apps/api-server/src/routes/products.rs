//! # Product Routes
//!
//! Admin CRUD and storefront reads for the catalog.
//!
//! No business logic here beyond parameter extraction and field validation;
//! everything else is one repository call.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use licoreria_core::validation::{
    validate_price_cents, validate_required, validate_stock,
};
use licoreria_core::{Category, Product};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Body of `POST /api/products`.
///
/// String fields default to empty so an absent field reports "x is
/// required" (400) instead of a bare deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    /// Validated against the closed category set, not stored as-is.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub stock: i64,
    pub vintage: Option<String>,
    pub alcohol_content: Option<f64>,
    pub origin: Option<String>,
}

impl CreateProductRequest {
    /// Validates the fields and builds the new catalog entry.
    fn into_product(self) -> Result<Product, ApiError> {
        validate_required("name", &self.name)?;
        validate_required("description", &self.description)?;
        validate_required("imageUrl", &self.image_url)?;
        validate_price_cents(self.price_cents)?;
        validate_stock(self.stock)?;
        let category: Category = self.category.parse()?;

        Ok(Product {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            description: self.description,
            price_cents: self.price_cents,
            category,
            image_url: self.image_url,
            stock: self.stock,
            vintage: self.vintage,
            alcohol_content: self.alcohol_content,
            origin: self.origin,
            created_at: Utc::now(),
        })
    }
}

/// Body of `PUT`/`PATCH /api/products/{id}`. Absent fields keep their
/// stored value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub stock: Option<i64>,
    pub vintage: Option<String>,
    pub alcohol_content: Option<f64>,
    pub origin: Option<String>,
}

impl UpdateProductRequest {
    /// Validates and merges the provided fields into the stored product.
    fn apply_to(self, product: &mut Product) -> Result<(), ApiError> {
        if let Some(name) = self.name {
            validate_required("name", &name)?;
            product.name = name;
        }
        if let Some(description) = self.description {
            validate_required("description", &description)?;
            product.description = description;
        }
        if let Some(price_cents) = self.price_cents {
            validate_price_cents(price_cents)?;
            product.price_cents = price_cents;
        }
        if let Some(category) = self.category {
            product.category = category.parse()?;
        }
        if let Some(image_url) = self.image_url {
            validate_required("imageUrl", &image_url)?;
            product.image_url = image_url;
        }
        if let Some(stock) = self.stock {
            validate_stock(stock)?;
            product.stock = stock;
        }
        if let Some(vintage) = self.vintage {
            product.vintage = Some(vintage);
        }
        if let Some(alcohol_content) = self.alcohol_content {
            product.alcohol_content = Some(alcohol_content);
        }
        if let Some(origin) = self.origin {
            product.origin = Some(origin);
        }
        Ok(())
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/products` — the whole catalog, newest first.
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.db.products().list().await?;
    Ok(Json(products))
}

/// `GET /api/products/{id}`.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;
    Ok(Json(product))
}

/// `POST /api/products` — create a catalog entry.
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = request.into_product()?;
    let created = state.db.products().insert(&product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT`/`PATCH /api/products/{id}` — merge the provided fields.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let mut product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;

    request.apply_to(&mut product)?;
    state.db.products().update(&product).await?;

    Ok(Json(product))
}

/// `DELETE /api/products/{id}` — hard delete.
///
/// Any cart line still referencing the product is pruned at the next cart
/// read or mutation.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.db.products().delete(&id).await?;
    Ok(Json(json!({ "message": "Product deleted" })))
}
