//! # Domain Types
//!
//! Core domain types used throughout the Licorería backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌───────────────────┐  │
//! │  │    Product      │   │    Category     │   │ ConsumptionRecord │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ───────────────  │  │
//! │  │  id (UUID)      │   │  Wine           │   │  id (UUID)        │  │
//! │  │  name           │   │  Whiskey        │   │  gender           │  │
//! │  │  price_cents    │   │  Vodka          │   │  count            │  │
//! │  │  stock          │   │  Gin, Rum, ...  │   │  countries        │  │
//! │  └─────────────────┘   └─────────────────┘   └───────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The category set is a closed sum type: unknown categories are rejected
//! at the API boundary, not at the storage layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Product category.
///
/// Closed enumeration matching the catalog taxonomy; everything that is
/// not one of the named spirits falls under `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
pub enum Category {
    Wine,
    Whiskey,
    Vodka,
    Gin,
    Rum,
    Tequila,
    Other,
}

impl Category {
    /// All valid categories, in display order.
    pub const ALL: [Category; 7] = [
        Category::Wine,
        Category::Whiskey,
        Category::Vodka,
        Category::Gin,
        Category::Rum,
        Category::Tequila,
        Category::Other,
    ];

    /// Canonical wire name of the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Wine => "Wine",
            Category::Whiskey => "Whiskey",
            Category::Vodka => "Vodka",
            Category::Gin => "Gin",
            Category::Rum => "Rum",
            Category::Tequila => "Tequila",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boundary validation: parses the category or reports the allowed set.
impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry available for sale.
///
/// Identity (`id`) is immutable; price, stock and metadata are mutable
/// through admin edits. Prices are integer cents, never floats.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the storefront.
    pub name: String,

    /// Longer description for the detail view.
    pub description: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Category from the closed set.
    pub category: Category,

    /// Image shown on the product card.
    pub image_url: String,

    /// Units currently available. Never negative.
    pub stock: i64,

    /// Harvest year, for wines.
    pub vintage: Option<String>,

    /// Alcohol by volume, percent.
    pub alcohol_content: Option<f64>,

    /// Country or region of origin.
    pub origin: Option<String>,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the requested quantity can be satisfied from stock.
    #[inline]
    pub fn has_stock(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Consumption Record
// =============================================================================

/// One row of the alcohol-consumption statistics table.
///
/// Wire field names keep the original dataset's capitalized headers so the
/// storefront's statistics view reads them unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ConsumptionRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Gender segment of the measurement.
    #[serde(rename = "Gender")]
    pub gender: String,

    /// Measured consumption value for the segment.
    #[serde(rename = "Count")]
    pub count: f64,

    /// Country name.
    #[serde(rename = "Countries")]
    pub countries: String,

    /// ISO country code.
    #[serde(rename = "CountriesCode")]
    pub countries_code: String,

    /// Measurement date.
    #[serde(rename = "Date")]
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("Wine".parse::<Category>().unwrap(), Category::Wine);
        assert_eq!("tequila".parse::<Category>().unwrap(), Category::Tequila);
        assert_eq!(" Rum ".parse::<Category>().unwrap(), Category::Rum);
    }

    #[test]
    fn test_category_rejects_unknown() {
        let err = "Beer".parse::<Category>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_category_wire_name_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_product_wire_shape() {
        let product = Product {
            id: "p-1".to_string(),
            name: "Rioja Reserva".to_string(),
            description: "Tempranillo, oak-aged".to_string(),
            price_cents: 1250,
            category: Category::Wine,
            image_url: "https://img.example/rioja.jpg".to_string(),
            stock: 5,
            vintage: Some("2018".to_string()),
            alcohol_content: Some(13.5),
            origin: Some("Spain".to_string()),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["priceCents"], 1250);
        assert_eq!(json["imageUrl"], "https://img.example/rioja.jpg");
        assert_eq!(json["category"], "Wine");
        assert_eq!(json["alcoholContent"], 13.5);
    }

    #[test]
    fn test_product_stock_check() {
        let product = Product {
            id: "p-1".to_string(),
            name: "Islay Single Malt".to_string(),
            description: "Peated".to_string(),
            price_cents: 5999,
            category: Category::Whiskey,
            image_url: "https://img.example/islay.jpg".to_string(),
            stock: 3,
            vintage: None,
            alcohol_content: Some(46.0),
            origin: Some("Scotland".to_string()),
            created_at: Utc::now(),
        };

        assert!(product.has_stock(3));
        assert!(!product.has_stock(4));
    }

    #[test]
    fn test_consumption_record_wire_shape() {
        let record = ConsumptionRecord {
            id: "c-1".to_string(),
            gender: "Female".to_string(),
            count: 4.7,
            countries: "Spain".to_string(),
            countries_code: "ES".to_string(),
            date: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Gender"], "Female");
        assert_eq!(json["Count"], 4.7);
        assert_eq!(json["Countries"], "Spain");
        assert_eq!(json["CountriesCode"], "ES");
        assert!(json["Date"].is_string());
    }
}
