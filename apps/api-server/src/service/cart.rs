//! # Cart Service
//!
//! The cart engine: orchestrates the pure aggregate rules from
//! `licoreria_core::cart` against the repositories.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Every Cart Operation                             │
//! │                                                                     │
//! │  1. Acquire the cart lock (single-writer, see below)                │
//! │  2. Load the aggregate (lazily creating it where the contract       │
//! │     allows: get, add)                                               │
//! │  3. Resolve the products involved                                   │
//! │  4. Apply the pure mutation (licoreria_core::Cart)                  │
//! │  5. Recompute the total from CURRENT prices, pruning lines whose    │
//! │     product no longer resolves                                      │
//! │  6. Persist in one transaction                                      │
//! │  7. Return the fully resolved cart                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The store has a single shared cart and assumes a single logical shopper.
//! An async mutex serializes all cart operations within this process, which
//! closes the read-modify-write race between two simultaneous updates. A
//! second server process against the same database would reintroduce it;
//! that deployment is out of scope and documented as such.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use licoreria_core::{Cart, CoreError, Product};
use licoreria_db::Database;

use crate::error::ApiError;

// =============================================================================
// Response Types
// =============================================================================

/// One fully resolved cart line: current product data joined onto the
/// stored (product_id, quantity) pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Current catalog entry for this line.
    pub product: Product,

    /// Units in the cart.
    pub quantity: i64,

    /// quantity × current price, in cents.
    pub line_total_cents: i64,
}

/// The resolved cart returned by every cart endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    /// Aggregate key.
    pub id: String,

    /// Resolved lines, in insertion order.
    pub items: Vec<CartLine>,

    /// Derived total in cents.
    pub total_cents: i64,

    /// When the cart was created.
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// When the cart last changed.
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// =============================================================================
// Cart Service
// =============================================================================

/// Cart engine bound to a database.
///
/// Cheap to clone; all clones share the same cart lock.
#[derive(Clone)]
pub struct CartService {
    db: Database,
    /// Serializes cart mutations. Held across the whole load-mutate-save
    /// sequence, never across unrelated work.
    lock: Arc<Mutex<()>>,
}

impl CartService {
    /// Creates a cart service over the given database.
    pub fn new(db: Database) -> Self {
        CartService {
            db,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the singleton cart, creating it if none exists.
    ///
    /// The total is recomputed before returning; if an external price edit
    /// or product deletion made the stored state stale, the corrected
    /// aggregate is persisted on the way out.
    pub async fn get_cart(&self) -> Result<CartResponse, ApiError> {
        let _guard = self.lock.lock().await;

        let mut cart = self.db.cart().load_or_create().await?;
        let products = self.resolve_lines(&cart).await?;

        if cart.recompute_total(&products) {
            debug!(total_cents = cart.total_cents, "Stored cart total was stale, repaired");
            self.db.cart().save(&cart).await?;
        }

        Ok(render(cart, products))
    }

    /// Adds a product to the cart (merging into an existing line).
    pub async fn add_item(&self, product_id: &str, quantity: i64) -> Result<CartResponse, ApiError> {
        let _guard = self.lock.lock().await;
        debug!(product_id = %product_id, quantity = %quantity, "add_item");

        let product = self.require_product(product_id).await?;
        let mut cart = self.db.cart().load_or_create().await?;

        cart.add_item(&product, quantity)?;

        self.recompute_and_save(&mut cart).await
    }

    /// Replaces the quantity of an existing line (≤ 0 removes it).
    pub async fn update_quantity(
        &self,
        product_id: &str,
        quantity: i64,
    ) -> Result<CartResponse, ApiError> {
        let _guard = self.lock.lock().await;
        debug!(product_id = %product_id, quantity = %quantity, "update_quantity");

        let mut cart = self
            .db
            .cart()
            .load()
            .await?
            .ok_or(CoreError::CartNotFound)?;
        let product = self.require_product(product_id).await?;

        cart.update_quantity(&product, quantity)?;

        self.recompute_and_save(&mut cart).await
    }

    /// Drops a line from the cart.
    ///
    /// Strict policy: removing a product that has no line is `NotFound`,
    /// consistent with `update_quantity`.
    pub async fn remove_item(&self, product_id: &str) -> Result<CartResponse, ApiError> {
        let _guard = self.lock.lock().await;
        debug!(product_id = %product_id, "remove_item");

        let mut cart = self
            .db
            .cart()
            .load()
            .await?
            .ok_or(CoreError::CartNotFound)?;

        cart.remove_item(product_id)?;

        self.recompute_and_save(&mut cart).await
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Looks up a product or fails with the 404-mapped domain error.
    async fn require_product(&self, product_id: &str) -> Result<Product, ApiError> {
        self.db
            .products()
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()).into())
    }

    /// Resolves every line's product in one query.
    async fn resolve_lines(&self, cart: &Cart) -> Result<Vec<Product>, ApiError> {
        let ids: Vec<String> = cart.items.iter().map(|l| l.product_id.clone()).collect();
        Ok(self.db.products().get_by_ids(&ids).await?)
    }

    /// Post-mutation tail shared by add/update/remove: re-derive the total
    /// from current prices, persist the aggregate, return the resolved view.
    async fn recompute_and_save(&self, cart: &mut Cart) -> Result<CartResponse, ApiError> {
        let products = self.resolve_lines(cart).await?;
        cart.recompute_total(&products);
        self.db.cart().save(cart).await?;
        Ok(render(cart.clone(), products))
    }
}

/// Joins resolved product data onto the stored lines.
///
/// Called after recomputation, so every retained line resolves.
fn render(cart: Cart, products: Vec<Product>) -> CartResponse {
    let by_id: HashMap<String, Product> =
        products.into_iter().map(|p| (p.id.clone(), p)).collect();

    let items = cart
        .items
        .iter()
        .filter_map(|line| {
            by_id.get(&line.product_id).map(|product| CartLine {
                product: product.clone(),
                quantity: line.quantity,
                line_total_cents: product.price().multiply_quantity(line.quantity).cents(),
            })
        })
        .collect();

    CartResponse {
        id: cart.id,
        items,
        total_cents: cart.total_cents,
        created_at: cart.created_at,
        updated_at: cart.updated_at,
    }
}

// =============================================================================
// Service Tests (against an in-memory database)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use licoreria_core::Category;
    use licoreria_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn insert_product(db: &Database, name: &str, price_cents: i64, stock: i64) -> Product {
        let product = Product {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: format!("{} description", name),
            price_cents,
            category: Category::Wine,
            image_url: "https://img.example/bottle.jpg".to_string(),
            stock,
            vintage: None,
            alcohol_content: Some(13.0),
            origin: None,
            created_at: Utc::now(),
        };
        db.products().insert(&product).await.unwrap();
        product
    }

    #[tokio::test]
    async fn test_get_cart_creates_empty_singleton() {
        let db = test_db().await;
        let service = CartService::new(db.clone());

        let cart = service.get_cart().await.unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.total_cents, 0);

        // The row was persisted: update/remove now see an (empty) cart
        assert!(db.cart().load().await.unwrap().is_some());
    }

    /// The worked example: product at $10.00 with stock 5.
    #[tokio::test]
    async fn test_add_add_update_remove_scenario() {
        let db = test_db().await;
        let service = CartService::new(db.clone());
        let product = insert_product(&db, "Rioja", 1000, 5).await;

        let cart = service.add_item(&product.id, 2).await.unwrap();
        assert_eq!(cart.total_cents, 2000);

        let cart = service.add_item(&product.id, 1).await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.total_cents, 3000);

        let err = service.update_quantity(&product.id, 6).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfStock);
        let cart = service.get_cart().await.unwrap();
        assert_eq!(cart.total_cents, 3000);

        let cart = service.remove_item(&product.id).await.unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.total_cents, 0);
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_not_found() {
        let db = test_db().await;
        let service = CartService::new(db);

        let err = service.add_item("ghost", 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_add_rejects_non_positive_quantity() {
        let db = test_db().await;
        let service = CartService::new(db.clone());
        let product = insert_product(&db, "Gin", 2650, 10).await;

        let err = service.add_item(&product.id, 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn test_update_without_cart_is_not_found() {
        let db = test_db().await;
        let service = CartService::new(db.clone());
        let product = insert_product(&db, "Gin", 2650, 10).await;

        let err = service.update_quantity(&product.id, 2).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_update_to_zero_removes_line() {
        let db = test_db().await;
        let service = CartService::new(db.clone());
        let product = insert_product(&db, "Vodka", 2199, 10).await;

        service.add_item(&product.id, 2).await.unwrap();
        let cart = service.update_quantity(&product.id, 0).await.unwrap();

        assert!(cart.items.is_empty());
        assert_eq!(cart.total_cents, 0);
    }

    #[tokio::test]
    async fn test_remove_missing_line_is_not_found() {
        let db = test_db().await;
        let service = CartService::new(db.clone());
        let a = insert_product(&db, "A", 1000, 5).await;
        let b = insert_product(&db, "B", 500, 5).await;

        service.add_item(&a.id, 1).await.unwrap();

        let err = service.remove_item(&b.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        // Cart unchanged by the failed remove
        let cart = service.get_cart().await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_cents, 1000);
    }

    #[tokio::test]
    async fn test_price_edit_is_reflected_on_next_read() {
        let db = test_db().await;
        let service = CartService::new(db.clone());
        let mut product = insert_product(&db, "Malbec", 1000, 10).await;

        service.add_item(&product.id, 2).await.unwrap();

        // Admin raises the price while the items sit in the cart
        product.price_cents = 1500;
        db.products().update(&product).await.unwrap();

        let cart = service.get_cart().await.unwrap();
        assert_eq!(cart.total_cents, 3000);
        assert_eq!(cart.items[0].product.price_cents, 1500);

        // The repaired total was persisted, not just rendered
        let stored = db.cart().load().await.unwrap().unwrap();
        assert_eq!(stored.total_cents, 3000);
    }

    #[tokio::test]
    async fn test_deleted_product_line_is_pruned() {
        let db = test_db().await;
        let service = CartService::new(db.clone());
        let keep = insert_product(&db, "Keep", 1000, 10).await;
        let gone = insert_product(&db, "Gone", 700, 10).await;

        service.add_item(&keep.id, 1).await.unwrap();
        service.add_item(&gone.id, 2).await.unwrap();

        db.products().delete(&gone.id).await.unwrap();

        let cart = service.get_cart().await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product.id, keep.id);
        assert_eq!(cart.total_cents, 1000);

        // Pruning is persistent: the stored line set shrank too
        let stored = db.cart().load().await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 1);
    }

    #[tokio::test]
    async fn test_two_products_total_is_sum_of_lines() {
        let db = test_db().await;
        let service = CartService::new(db.clone());
        let wine = insert_product(&db, "Wine", 1250, 10).await;
        let rum = insert_product(&db, "Rum", 3100, 10).await;

        service.add_item(&wine.id, 2).await.unwrap();
        let cart = service.add_item(&rum.id, 1).await.unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total_cents, 2 * 1250 + 3100);
        assert_eq!(cart.items[0].line_total_cents, 2500);
        assert_eq!(cart.items[1].line_total_cents, 3100);
    }
}
