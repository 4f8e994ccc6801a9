//! # licoreria-core: Pure Business Logic for the Licorería Backend
//!
//! This crate is the heart of the system. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Licorería Architecture                         │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                  Storefront (React)                           │  │
//! │  │   Product List ──► Cart ──► Admin Forms ──► Statistics        │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │ HTTP (JSON)                       │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │                  apps/api-server (axum)                       │  │
//! │  │   /api/products, /api/cart, /api/alcohol-consumption          │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │              ★ licoreria-core (THIS CRATE) ★                  │  │
//! │  │                                                               │  │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌────────────┐    │  │
//! │  │   │  types   │  │  money   │  │   cart   │  │ validation │    │  │
//! │  │   │ Product  │  │  Money   │  │   Cart   │  │   rules    │    │  │
//! │  │   │ Category │  │  cents   │  │ CartItem │  │   checks   │    │  │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └────────────┘    │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │                licoreria-db (Database Layer)                  │  │
//! │  │          SQLite queries, migrations, repositories             │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, ConsumptionRecord)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart aggregate and its mutation/recomputation rules
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use licoreria_core::Money` instead of
// `use licoreria_core::money::Money`

pub use cart::{Cart, CartItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed key for the singleton cart aggregate.
///
/// The store supports exactly one shared cart. Persisting it under a fixed
/// key keeps the repository honest about that invariant; a future multi-user
/// version would key carts by session or user id instead.
pub const CART_KEY: &str = "00000000-0000-0000-0000-000000000001";

/// Maximum distinct line items allowed in the cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Guards against accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
