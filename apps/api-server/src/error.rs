//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow in the API                           │
//! │                                                                     │
//! │  Storefront                    Rust Backend                         │
//! │  ──────────                    ────────────                         │
//! │                                                                     │
//! │  PUT /api/cart/update/:id                                           │
//! │         │                                                           │
//! │         ▼                                                           │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │  Handler: Result<Json<T>, ApiError>                           │  │
//! │  │         │                                                     │  │
//! │  │  CoreError::ItemNotInCart ──────────► NotFound        (404)   │  │
//! │  │  CoreError::InsufficientStock ──────► OutOfStock      (400)   │  │
//! │  │  CoreError::Validation ─────────────► InvalidArgument (400)   │  │
//! │  │  DbError::* ────────────────────────► Internal        (500)   │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │         │                                                           │
//! │         ▼                                                           │
//! │  { "message": "Item not found in cart: …" }                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The body is always `{"message": string}`; the status carries the
//! machine-readable part.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use licoreria_core::{CoreError, ValidationError};
use licoreria_db::DbError;

/// Error categories exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Malformed input: bad quantity, missing field, unknown category (400)
    InvalidArgument,

    /// Requested quantity exceeds stock (400)
    OutOfStock,

    /// Store unavailable / unexpected fault (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this category.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorCode::OutOfStock => StatusCode::BAD_REQUEST,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error returned from HTTP handlers.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Machine-readable error category
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates an invalid-argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidArgument, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(json!({ "message": self.message }))).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductNotFound(_)
            | CoreError::CartNotFound
            | CoreError::ItemNotInCart(_) => ErrorCode::NotFound,
            CoreError::InsufficientStock { .. } => ErrorCode::OutOfStock,
            CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::Validation(_) => ErrorCode::InvalidArgument,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts validation errors directly (used by admin form handlers).
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::invalid(err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            other => {
                // Log the real failure but keep the wire message generic
                tracing::error!(error = %other, "Database operation failed");
                ApiError::internal("Database operation failed")
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::InvalidArgument.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::OutOfStock.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_core_error_conversion() {
        let err: ApiError = CoreError::ProductNotFound("p-1".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = CoreError::InsufficientStock {
            product_id: "p-1".to_string(),
            available: 2,
            requested: 5,
        }
        .into();
        assert_eq!(err.code, ErrorCode::OutOfStock);

        let err: ApiError = CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_db_error_conversion() {
        let err: ApiError = DbError::not_found("Product", "p-1").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: p-1");

        let err: ApiError = DbError::PoolExhausted.into();
        assert_eq!(err.code, ErrorCode::Internal);
    }
}
