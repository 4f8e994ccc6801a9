//! HTTP routing.
//!
//! One route table for the whole API; handlers live in the sibling modules
//! and the service layer does the heavy lifting.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub mod cart;
pub mod consumption;
pub mod products;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Liveness probe
        .route("/health", get(health))
        // Catalog
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        // Cart
        .route("/api/cart", get(cart::get_cart))
        .route("/api/cart/add", post(cart::add_item))
        .route("/api/cart/update/{product_id}", put(cart::update_item))
        .route("/api/cart/remove/{product_id}", delete(cart::remove_item))
        // Consumption statistics
        .route(
            "/api/alcohol-consumption",
            get(consumption::list_records).post(consumption::create_record),
        )
        .route(
            "/api/alcohol-consumption/country/{country}",
            get(consumption::list_by_country),
        )
        .route(
            "/api/alcohol-consumption/{id}",
            axum::routing::patch(consumption::update_record).delete(consumption::delete_record),
        )
        .with_state(state)
}

/// `GET /health` — liveness plus a storage round trip.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.db.health_check().await {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        )
    }
}
