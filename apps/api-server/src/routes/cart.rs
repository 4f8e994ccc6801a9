//! # Cart Routes
//!
//! Thin handlers over [`CartService`](crate::service::cart::CartService);
//! all four endpoints return the fully resolved cart.
//!
//! ```text
//! GET    /api/cart                      → current cart (created lazily)
//! POST   /api/cart/add                  → {productId, quantity}
//! PUT    /api/cart/update/{productId}   → {quantity}
//! DELETE /api/cart/remove/{productId}
//! ```

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::service::cart::CartResponse;
use crate::state::AppState;

/// Body of `POST /api/cart/add`.
///
/// An absent quantity defaults to 0 and is rejected as "quantity must be a
/// positive integer" rather than a bare deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: String,
    #[serde(default)]
    pub quantity: i64,
}

/// Body of `PUT /api/cart/update/{productId}`.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i64,
}

/// `GET /api/cart`.
pub async fn get_cart(State(state): State<AppState>) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.cart.get_cart().await?;
    Ok(Json(cart))
}

/// `POST /api/cart/add`.
pub async fn add_item(
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state
        .cart
        .add_item(&request.product_id, request.quantity)
        .await?;
    Ok(Json(cart))
}

/// `PUT /api/cart/update/{productId}`.
pub async fn update_item(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state
        .cart
        .update_quantity(&product_id, request.quantity)
        .await?;
    Ok(Json(cart))
}

/// `DELETE /api/cart/remove/{productId}`.
pub async fn remove_item(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.cart.remove_item(&product_id).await?;
    Ok(Json(cart))
}
