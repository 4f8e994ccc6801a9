//! Shared application state.
//!
//! One `AppState` is built at startup and cloned into every handler via
//! axum's `State` extractor. All members are cheap to clone.

use licoreria_db::Database;

use crate::service::cart::CartService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (repository access).
    pub db: Database,

    /// Cart engine: orchestrates cart mutations against the store.
    pub cart: CartService,
}

impl AppState {
    /// Builds the state from a connected database.
    pub fn new(db: Database) -> Self {
        AppState {
            cart: CartService::new(db.clone()),
            db,
        }
    }
}
