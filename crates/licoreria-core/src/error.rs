//! # Error Types
//!
//! Domain-specific error types for licoreria-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  licoreria-core errors (this file)                                  │
//! │  ├── CoreError        - Cart and catalog rule violations            │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  licoreria-db errors (separate crate)                               │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  API errors (in apps/api-server)                                    │
//! │  └── ApiError         - HTTP status + {"message": ...} body         │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → client    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, quantities, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations or domain logic failures. The
/// API layer translates them into HTTP statuses (404 for the not-found
/// variants, 400 for the rest).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// Raised when a cart operation references a product id that no longer
    /// resolves against the catalog (never created, or deleted since).
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No cart aggregate exists yet.
    ///
    /// Only `update` and `remove` require an existing cart; reads and adds
    /// create the singleton lazily instead.
    #[error("Cart not found")]
    CartNotFound,

    /// The cart holds no line for the given product.
    #[error("Item not found in cart: {0}")]
    ItemNotInCart(String),

    /// Requested quantity exceeds available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Update quantity to 6
    ///      │
    ///      ▼
    /// Check stock: available = 5
    ///      │
    ///      ▼
    /// InsufficientStock { product_id, available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// UI shows: "Only 5 in stock"
    /// ```
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// Cart has exceeded maximum allowed line items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be a positive integer")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
