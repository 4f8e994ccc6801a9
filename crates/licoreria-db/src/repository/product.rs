//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - List for the storefront grid (newest first)
//! - Point lookups by id for cart resolution
//! - Batch lookup (`get_by_ids`) so a cart recomputation costs one query
//! - Admin CRUD
//!
//! Deletes are hard deletes: a removed product stops resolving immediately,
//! and any cart line that still references it is pruned at the next total
//! recomputation.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use licoreria_core::Product;

/// All product columns, in table order. Shared by every SELECT.
const PRODUCT_COLUMNS: &str = "id, name, description, price_cents, category, \
     image_url, stock, vintage, alcohol_content, origin, created_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let all = repo.list().await?;
/// let one = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the whole catalog, newest first.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found (or deleted)
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets every product whose id is in `ids`, in one round trip.
    ///
    /// Ids that don't resolve are simply absent from the result; the caller
    /// decides what a missing product means (for the cart: prune the line).
    pub async fn get_by_ids(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id IN ("
        ));
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(id.as_str());
        }
        separated.push_unseparated(")");

        let products = qb
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        debug!(
            requested = ids.len(),
            resolved = products.len(),
            "Batch product lookup"
        );
        Ok(products)
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price_cents, category,
                image_url, stock, vintage, alcohol_content, origin, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.category)
        .bind(&product.image_url)
        .bind(product.stock)
        .bind(&product.vintage)
        .bind(product.alcohol_content)
        .bind(&product.origin)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(product.clone())
    }

    /// Updates an existing product (full row by id).
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                category = ?5,
                image_url = ?6,
                stock = ?7,
                vintage = ?8,
                alcohol_content = ?9,
                origin = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.category)
        .bind(&product.image_url)
        .bind(product.stock)
        .bind(&product.vintage)
        .bind(product.alcohol_content)
        .bind(&product.origin)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// Hard delete: cart lines referencing it will stop resolving and are
    /// pruned on the next recomputation.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts catalog entries (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use licoreria_core::Category;

    fn sample_product(name: &str, price_cents: i64, stock: i64) -> Product {
        Product {
            id: generate_product_id(),
            name: name.to_string(),
            description: format!("{} description", name),
            price_cents,
            category: Category::Wine,
            image_url: "https://img.example/bottle.jpg".to_string(),
            stock,
            vintage: Some("2019".to_string()),
            alcohol_content: Some(13.0),
            origin: Some("Spain".to_string()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let product = sample_product("Rioja Reserva", 1250, 8);
        repo.insert(&product).await.unwrap();

        let loaded = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Rioja Reserva");
        assert_eq!(loaded.price_cents, 1250);
        assert_eq!(loaded.category, Category::Wine);
        assert_eq!(loaded.stock, 8);
        assert_eq!(loaded.vintage.as_deref(), Some("2019"));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let missing = db.products().get_by_id("no-such-id").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_get_by_ids_skips_unresolved() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let a = sample_product("A", 1000, 5);
        let b = sample_product("B", 750, 5);
        repo.insert(&a).await.unwrap();
        repo.insert(&b).await.unwrap();

        let found = repo
            .get_by_ids(&[a.id.clone(), "ghost".to_string(), b.id.clone()])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let mut product = sample_product("Anejo", 3500, 3);
        repo.insert(&product).await.unwrap();

        product.price_cents = 3900;
        product.stock = 1;
        repo.update(&product).await.unwrap();

        let loaded = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(loaded.price_cents, 3900);
        assert_eq!(loaded.stock, 1);

        repo.delete(&product.id).await.unwrap();
        assert!(repo.get_by_id(&product.id).await.unwrap().is_none());

        // Deleting again reports NotFound
        let err = repo.delete(&product.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let phantom = sample_product("Phantom", 100, 0);
        let err = db.products().update(&phantom).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let mut older = sample_product("Older", 100, 1);
        older.created_at = Utc::now() - chrono::Duration::hours(1);
        let newer = sample_product("Newer", 200, 1);

        repo.insert(&older).await.unwrap();
        repo.insert(&newer).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Newer");
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
