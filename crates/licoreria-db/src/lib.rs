//! # licoreria-db: Database Layer for the Licorería Backend
//!
//! SQLite storage behind async repositories, using sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Licorería Data Flow                            │
//! │                                                                     │
//! │  API handler (GET /api/cart)                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                  licoreria-db (THIS CRATE)                    │  │
//! │  │                                                               │  │
//! │  │   ┌─────────────┐   ┌────────────────┐   ┌───────────────┐    │  │
//! │  │   │  Database   │   │  Repositories  │   │  Migrations   │    │  │
//! │  │   │  (pool.rs)  │   │  product.rs    │   │  (embedded)   │    │  │
//! │  │   │             │◄──│  cart.rs       │   │  001_init.sql │    │  │
//! │  │   │ SqlitePool  │   │  consumption.rs│   │               │    │  │
//! │  │   └─────────────┘   └────────────────┘   └───────────────┘    │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (WAL mode, foreign keys on)                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, cart, consumption)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use licoreria_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("data/licoreria.db")).await?;
//! let products = db.products().list().await?;
//! let cart = db.cart().load_or_create().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::cart::CartRepository;
pub use repository::consumption::ConsumptionRepository;
pub use repository::product::ProductRepository;
