//! # Cart Repository
//!
//! Persistence for the singleton cart aggregate.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Cart Persistence                               │
//! │                                                                     │
//! │  carts                          cart_items                          │
//! │  ┌──────────────────────┐       ┌────────────────────────────────┐  │
//! │  │ id   (= CART_KEY)    │◄──────│ cart_id                        │  │
//! │  │ total_cents          │       │ product_id  (may dangle)       │  │
//! │  │ created_at           │       │ quantity                       │  │
//! │  │ updated_at           │       │ position    (insertion order)  │  │
//! │  └──────────────────────┘       └────────────────────────────────┘  │
//! │                                                                     │
//! │  Exactly one row in `carts`; lines are replaced wholesale inside    │
//! │  one transaction on every save.                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The whole aggregate is written in a single transaction so a failed save
//! can never leave the stored total disagreeing with the stored lines.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use licoreria_core::{Cart, CartItem, CART_KEY};

/// Raw `carts` table row. Items are loaded separately and joined in.
#[derive(Debug, sqlx::FromRow)]
struct CartRow {
    id: String,
    total_cents: i64,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

/// Raw `cart_items` table row.
#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    product_id: String,
    quantity: i64,
}

/// Repository for the singleton cart.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CartRepository::new(pool);
///
/// let mut cart = repo.load_or_create().await?;
/// // ...mutate via licoreria_core::Cart...
/// repo.save(&cart).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Loads the singleton cart, if one has been created yet.
    pub async fn load(&self) -> DbResult<Option<Cart>> {
        let row = sqlx::query_as::<_, CartRow>(
            "SELECT id, total_cents, created_at, updated_at FROM carts WHERE id = ?1",
        )
        .bind(CART_KEY)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, CartItemRow>(
            "SELECT product_id, quantity FROM cart_items \
             WHERE cart_id = ?1 ORDER BY position",
        )
        .bind(CART_KEY)
        .fetch_all(&self.pool)
        .await?;

        debug!(lines = items.len(), "Loaded cart");

        Ok(Some(Cart {
            id: row.id,
            items: items
                .into_iter()
                .map(|r| CartItem {
                    product_id: r.product_id,
                    quantity: r.quantity,
                })
                .collect(),
            total_cents: row.total_cents,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }

    /// Loads the cart, creating and persisting an empty one if none exists.
    ///
    /// This is the lazy-creation path behind `GET /api/cart` and
    /// `POST /api/cart/add`.
    pub async fn load_or_create(&self) -> DbResult<Cart> {
        if let Some(cart) = self.load().await? {
            return Ok(cart);
        }

        let cart = Cart::new();
        debug!(id = %cart.id, "Creating empty cart");

        sqlx::query(
            "INSERT INTO carts (id, total_cents, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&cart.id)
        .bind(cart.total_cents)
        .bind(cart.created_at)
        .bind(cart.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(cart)
    }

    /// Persists the aggregate: header upsert plus wholesale line replacement,
    /// all inside one transaction.
    pub async fn save(&self, cart: &Cart) -> DbResult<()> {
        debug!(lines = cart.items.len(), total_cents = cart.total_cents, "Saving cart");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO carts (id, total_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                total_cents = excluded.total_cents,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&cart.id)
        .bind(cart.total_cents)
        .bind(cart.created_at)
        .bind(cart.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1")
            .bind(&cart.id)
            .execute(&mut *tx)
            .await?;

        for (position, item) in cart.items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO cart_items (cart_id, product_id, quantity, position) \
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(&cart.id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_load_before_create_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.cart().load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_or_create_persists_empty_cart() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cart();

        let cart = repo.load_or_create().await.unwrap();
        assert_eq!(cart.id, CART_KEY);
        assert!(cart.is_empty());
        assert_eq!(cart.total_cents, 0);

        // The row now exists; a plain load finds it
        let reloaded = repo.load().await.unwrap().unwrap();
        assert_eq!(reloaded.id, CART_KEY);
    }

    #[tokio::test]
    async fn test_save_and_reload_preserves_line_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cart();

        let mut cart = repo.load_or_create().await.unwrap();
        cart.items = vec![
            CartItem {
                product_id: "first".to_string(),
                quantity: 2,
            },
            CartItem {
                product_id: "second".to_string(),
                quantity: 1,
            },
            CartItem {
                product_id: "third".to_string(),
                quantity: 5,
            },
        ];
        cart.total_cents = 4200;
        repo.save(&cart).await.unwrap();

        let reloaded = repo.load().await.unwrap().unwrap();
        assert_eq!(reloaded.total_cents, 4200);
        let ids: Vec<_> = reloaded
            .items
            .iter()
            .map(|l| l.product_id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_save_replaces_lines_wholesale() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cart();

        let mut cart = repo.load_or_create().await.unwrap();
        cart.items = vec![CartItem {
            product_id: "a".to_string(),
            quantity: 3,
        }];
        repo.save(&cart).await.unwrap();

        cart.items = vec![CartItem {
            product_id: "b".to_string(),
            quantity: 1,
        }];
        cart.total_cents = 999;
        repo.save(&cart).await.unwrap();

        let reloaded = repo.load().await.unwrap().unwrap();
        assert_eq!(reloaded.items.len(), 1);
        assert_eq!(reloaded.items[0].product_id, "b");
        assert_eq!(reloaded.total_cents, 999);
    }
}
