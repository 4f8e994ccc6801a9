//! # Cart Aggregate
//!
//! The shared shopping cart and its mutation rules.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Cart Invariants                              │
//! │                                                                     │
//! │  1. At most one line per distinct product                           │
//! │     (adding an existing product merges quantities)                  │
//! │                                                                     │
//! │  2. quantity ≥ 1 for every retained line                            │
//! │     (an update to quantity ≤ 0 removes the line instead)            │
//! │                                                                     │
//! │  3. total_cents == Σ quantity × CURRENT product price               │
//! │     (recomputed from scratch on every read and mutation; the        │
//! │      stored total is never trusted)                                 │
//! │                                                                     │
//! │  4. Lines whose product no longer resolves are pruned               │
//! │                                                                     │
//! │  5. No line may exceed the product's available stock                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Full Recomputation?
//! The cart does not snapshot prices at add-time. Admin edits can change a
//! product's price while it sits in the cart, so the only defense against
//! total drift is re-deriving the total from current prices each time.
//! Incremental patching of a running total is deliberately not offered.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_quantity;
use crate::{CART_KEY, MAX_CART_ITEMS, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Item
// =============================================================================

/// One (product, quantity) line within the cart.
///
/// Holds only the product reference; price is *not* frozen here. The
/// resolved product data is joined in at read time so the line always
/// reflects the current catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product ID (UUID) this line refers to.
    pub product_id: String,

    /// Units of the product in the cart. Always ≥ 1.
    pub quantity: i64,
}

// =============================================================================
// Cart
// =============================================================================

/// The singleton cart aggregate.
///
/// Exactly one cart exists per store, persisted under [`CART_KEY`]. Lines
/// keep insertion order. All mutation rules live here as pure functions:
/// callers resolve products first, then apply a mutation, then recompute.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Aggregate key. Always [`CART_KEY`] in the single-cart deployment.
    pub id: String,

    /// Ordered line items.
    pub items: Vec<CartItem>,

    /// Derived total in cents. See invariant 3.
    pub total_cents: i64,

    /// When the cart row was first created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the cart was last mutated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart under the fixed singleton key.
    pub fn new() -> Self {
        let now = Utc::now();
        Cart {
            id: CART_KEY.to_string(),
            items: Vec::new(),
            total_cents: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds a product to the cart, merging into an existing line.
    ///
    /// ## Behavior
    /// - quantity must be ≥ 1 (validated up front)
    /// - if the product is already present the quantities are summed
    /// - the merged quantity must fit within the product's stock
    ///
    /// Stock is enforced on add exactly like on update; a line that could
    /// never be fulfilled is rejected instead of parked in the cart.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let merged = self
            .items
            .iter()
            .find(|line| line.product_id == product.id)
            .map_or(quantity, |line| line.quantity + quantity);

        if merged > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: merged,
                max: MAX_LINE_QUANTITY,
            });
        }

        if !product.has_stock(merged) {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                available: product.stock,
                requested: merged,
            });
        }

        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = merged;
        } else {
            if self.items.len() >= MAX_CART_ITEMS {
                return Err(CoreError::CartTooLarge {
                    max: MAX_CART_ITEMS,
                });
            }
            self.items.push(CartItem {
                product_id: product.id.clone(),
                quantity,
            });
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// Replaces the quantity of an existing line.
    ///
    /// ## Behavior
    /// - the line must exist, else [`CoreError::ItemNotInCart`]
    /// - quantity ≤ 0 removes the line (invariant 2)
    /// - quantity must fit within the product's current stock
    pub fn update_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if !self.items.iter().any(|l| l.product_id == product.id) {
            return Err(CoreError::ItemNotInCart(product.id.clone()));
        }

        if quantity <= 0 {
            return self.remove_item(&product.id);
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        if !product.has_stock(quantity) {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        // Existence checked above, the line is present
        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = quantity;
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// Drops the line for the given product.
    ///
    /// Strict policy: removing a product that is not in the cart is an
    /// [`CoreError::ItemNotInCart`] error, consistent with
    /// [`Cart::update_quantity`].
    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let before = self.items.len();
        self.items.retain(|l| l.product_id != product_id);

        if self.items.len() == before {
            return Err(CoreError::ItemNotInCart(product_id.to_string()));
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// Re-derives the total from current product prices.
    ///
    /// Lines whose product id is absent from `products` no longer resolve
    /// (the product was deleted) and are pruned from the item list entirely.
    /// Returns `true` when the cart changed: lines were pruned or the
    /// stored total was stale.
    ///
    /// ## Recomputation, Not Patching
    /// ```text
    /// items: [(A, 2), (B, 1)]     current prices: A=$10.00  B=$7.50
    ///      │
    ///      ▼
    /// total = 2×1000 + 1×750 = 2750 cents
    /// ```
    pub fn recompute_total(&mut self, products: &[Product]) -> bool {
        let prices: HashMap<&str, Money> = products
            .iter()
            .map(|p| (p.id.as_str(), p.price()))
            .collect();

        let before_lines = self.items.len();
        self.items.retain(|l| prices.contains_key(l.product_id.as_str()));
        let pruned = before_lines != self.items.len();

        let total: i64 = self
            .items
            .iter()
            .filter_map(|l| {
                prices
                    .get(l.product_id.as_str())
                    .map(|price| price.multiply_quantity(l.quantity).cents())
            })
            .sum();

        let changed = pruned || total != self.total_cents;
        self.total_cents = total;
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    /// Returns the total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the number of distinct lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn test_product(id: &str, price_cents: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: "test".to_string(),
            price_cents,
            category: Category::Other,
            image_url: "https://img.example/p.jpg".to_string(),
            stock,
            vintage: None,
            alcohol_content: None,
            origin: None,
            created_at: Utc::now(),
        }
    }

    fn recompute(cart: &mut Cart, products: &[Product]) {
        cart.recompute_total(products);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let product = test_product("a", 999, 10);

        cart.add_item(&product, 2).unwrap();
        recompute(&mut cart, std::slice::from_ref(&product));

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_cents, 1998);
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let mut cart = Cart::new();
        let product = test_product("a", 999, 10);

        cart.add_item(&product, 2).unwrap();
        cart.add_item(&product, 3).unwrap();

        assert_eq!(cart.item_count(), 1); // still one line
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        let product = test_product("a", 999, 10);

        assert!(matches!(
            cart.add_item(&product, 0),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            cart.add_item(&product, -3),
            Err(CoreError::Validation(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_enforces_stock_on_merged_quantity() {
        let mut cart = Cart::new();
        let product = test_product("a", 999, 5);

        cart.add_item(&product, 3).unwrap();

        // 3 already in cart + 3 more would exceed stock of 5
        let err = cart.add_item(&product, 3).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            }
        ));
        assert_eq!(cart.items[0].quantity, 3); // unchanged
    }

    #[test]
    fn test_update_quantity_replaces_line() {
        let mut cart = Cart::new();
        let product = test_product("a", 1000, 10);

        cart.add_item(&product, 2).unwrap();
        cart.update_quantity(&product, 7).unwrap();
        recompute(&mut cart, std::slice::from_ref(&product));

        assert_eq!(cart.items[0].quantity, 7);
        assert_eq!(cart.total_cents, 7000);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        let product = test_product("a", 1000, 10);

        cart.add_item(&product, 2).unwrap();
        cart.update_quantity(&product, 0).unwrap();
        recompute(&mut cart, std::slice::from_ref(&product));

        assert!(cart.is_empty());
        assert_eq!(cart.total_cents, 0);
    }

    #[test]
    fn test_update_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        let product = test_product("a", 1000, 10);

        cart.add_item(&product, 2).unwrap();
        cart.update_quantity(&product, -4).unwrap();

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_over_stock_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let product = test_product("a", 1000, 5);

        cart.add_item(&product, 3).unwrap();
        recompute(&mut cart, std::slice::from_ref(&product));

        let err = cart.update_quantity(&product, 6).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.total_cents, 3000);
    }

    #[test]
    fn test_update_missing_line_is_not_found() {
        let mut cart = Cart::new();
        let product = test_product("a", 1000, 5);

        let err = cart.update_quantity(&product, 2).unwrap_err();
        assert!(matches!(err, CoreError::ItemNotInCart(_)));
    }

    #[test]
    fn test_remove_missing_line_is_not_found() {
        let mut cart = Cart::new();

        let err = cart.remove_item("ghost").unwrap_err();
        assert!(matches!(err, CoreError::ItemNotInCart(_)));
    }

    #[test]
    fn test_recompute_uses_current_prices() {
        let mut cart = Cart::new();
        let mut product = test_product("a", 1000, 10);

        cart.add_item(&product, 2).unwrap();
        recompute(&mut cart, std::slice::from_ref(&product));
        assert_eq!(cart.total_cents, 2000);

        // Admin edits the price; the stale stored total must not survive
        product.price_cents = 1500;
        let changed = cart.recompute_total(std::slice::from_ref(&product));
        assert!(changed);
        assert_eq!(cart.total_cents, 3000);
    }

    #[test]
    fn test_recompute_prunes_deleted_products() {
        let mut cart = Cart::new();
        let a = test_product("a", 1000, 10);
        let b = test_product("b", 750, 10);

        cart.add_item(&a, 2).unwrap();
        cart.add_item(&b, 1).unwrap();
        recompute(&mut cart, &[a.clone(), b]);
        assert_eq!(cart.total_cents, 2750);

        // Product "b" deleted from the catalog: only "a" resolves now
        let changed = cart.recompute_total(std::slice::from_ref(&a));
        assert!(changed);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].product_id, "a");
        assert_eq!(cart.total_cents, 2000);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut cart = Cart::new();
        let product = test_product("a", 1000, 10);

        cart.add_item(&product, 2).unwrap();
        assert!(cart.recompute_total(std::slice::from_ref(&product)));
        assert!(!cart.recompute_total(std::slice::from_ref(&product)));
        assert_eq!(cart.total_cents, 2000);
    }

    /// The worked example from the product brief: price $10.00, stock 5.
    #[test]
    fn test_add_add_update_remove_scenario() {
        let mut cart = Cart::new();
        let product = test_product("a", 1000, 5);
        let catalog = [product.clone()];

        cart.add_item(&product, 2).unwrap();
        cart.recompute_total(&catalog);
        assert_eq!(cart.total_cents, 2000);

        cart.add_item(&product, 1).unwrap();
        cart.recompute_total(&catalog);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.total_cents, 3000);

        let err = cart.update_quantity(&product, 6).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        cart.recompute_total(&catalog);
        assert_eq!(cart.total_cents, 3000);

        cart.remove_item(&product.id).unwrap();
        cart.recompute_total(&catalog);
        assert!(cart.is_empty());
        assert_eq!(cart.total_cents, 0);
    }

    #[test]
    fn test_cart_too_large() {
        let mut cart = Cart::new();

        for i in 0..MAX_CART_ITEMS {
            let product = test_product(&format!("p{}", i), 100, 10);
            cart.add_item(&product, 1).unwrap();
        }

        let one_more = test_product("overflow", 100, 10);
        let err = cart.add_item(&one_more, 1).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));
    }
}
