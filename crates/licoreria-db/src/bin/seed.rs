//! # Seed Data Generator
//!
//! Populates the database with a starter catalog and the consumption
//! statistics table for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p licoreria-db --bin seed
//!
//! # Specify database path
//! cargo run -p licoreria-db --bin seed -- --db ./data/licoreria.db
//! ```
//!
//! Seeding is skipped when the catalog already has rows, so it is safe to
//! run on every developer setup.

use chrono::{TimeZone, Utc};
use std::env;

use licoreria_core::{Category, ConsumptionRecord, Product};
use licoreria_db::repository::consumption::generate_record_id;
use licoreria_db::repository::product::generate_product_id;
use licoreria_db::{Database, DbConfig};

/// Starter catalog: (name, description, price cents, category, stock, vintage, abv, origin).
const CATALOG: &[(
    &str,
    &str,
    i64,
    Category,
    i64,
    Option<&str>,
    Option<f64>,
    Option<&str>,
)] = &[
    (
        "Rioja Reserva",
        "Tempranillo aged 36 months in American oak",
        1250,
        Category::Wine,
        24,
        Some("2018"),
        Some(13.5),
        Some("Spain"),
    ),
    (
        "Malbec Estate",
        "High-altitude Mendoza malbec, dark fruit and violets",
        980,
        Category::Wine,
        30,
        Some("2021"),
        Some(14.0),
        Some("Argentina"),
    ),
    (
        "Islay Single Malt 12",
        "Heavily peated coastal single malt, sherry finish",
        5999,
        Category::Whiskey,
        10,
        None,
        Some(46.0),
        Some("Scotland"),
    ),
    (
        "Straight Bourbon",
        "Small batch, high-rye mash bill, caramel and spice",
        3450,
        Category::Whiskey,
        18,
        None,
        Some(45.0),
        Some("USA"),
    ),
    (
        "Winter Wheat Vodka",
        "Column-distilled seven times, exceptionally clean",
        2199,
        Category::Vodka,
        40,
        None,
        Some(40.0),
        Some("Poland"),
    ),
    (
        "London Dry Gin",
        "Juniper-forward with coriander and citrus peel",
        2650,
        Category::Gin,
        22,
        None,
        Some(43.0),
        Some("England"),
    ),
    (
        "A\u{f1}ejo Ron Solera",
        "Solera-aged dark rum, toffee and dried fig",
        3100,
        Category::Rum,
        14,
        None,
        Some(40.0),
        Some("Venezuela"),
    ),
    (
        "Tequila Reposado",
        "100% blue agave, rested six months in ex-bourbon casks",
        3890,
        Category::Tequila,
        16,
        None,
        Some(38.0),
        Some("Mexico"),
    ),
    (
        "Mezcal Joven",
        "Espad\u{ed}n agave roasted in earthen pits",
        4250,
        Category::Other,
        8,
        None,
        Some(47.0),
        Some("Mexico"),
    ),
    (
        "Vermouth Rosso",
        "Botanical fortified wine, bitter orange and wormwood",
        1575,
        Category::Other,
        26,
        None,
        Some(16.0),
        Some("Italy"),
    ),
];

/// Per-country consumption rows: (gender, count, country, code, year).
const CONSUMPTION: &[(&str, f64, &str, &str, i32)] = &[
    ("All", 10.0, "Spain", "ES", 2019),
    ("Male", 15.1, "Spain", "ES", 2019),
    ("Female", 5.1, "Spain", "ES", 2019),
    ("All", 11.4, "France", "FR", 2019),
    ("Male", 17.2, "France", "FR", 2019),
    ("Female", 5.9, "France", "FR", 2019),
    ("All", 9.8, "USA", "US", 2019),
    ("All", 6.3, "Peru", "PE", 2019),
    ("All", 7.1, "Mexico", "MX", 2019),
    ("All", 10.4, "Germany", "DE", 2019),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let db_path = parse_db_path().unwrap_or_else(|| "./data/licoreria.db".to_string());

    tracing::info!(path = %db_path, "Seeding database");
    let db = Database::new(DbConfig::new(&db_path)).await?;

    let products = db.products();
    if products.count().await? > 0 {
        tracing::info!("Catalog already seeded, nothing to do");
        return Ok(());
    }

    for (name, description, price_cents, category, stock, vintage, abv, origin) in CATALOG {
        let product = Product {
            id: generate_product_id(),
            name: (*name).to_string(),
            description: (*description).to_string(),
            price_cents: *price_cents,
            category: *category,
            image_url: format!(
                "https://images.licoreria.example/{}.jpg",
                name.to_lowercase().replace(' ', "-")
            ),
            stock: *stock,
            vintage: vintage.map(str::to_string),
            alcohol_content: *abv,
            origin: origin.map(str::to_string),
            created_at: Utc::now(),
        };
        products.insert(&product).await?;
    }
    tracing::info!(count = CATALOG.len(), "Catalog seeded");

    let consumption = db.consumption();
    for (gender, count, country, code, year) in CONSUMPTION {
        let record = ConsumptionRecord {
            id: generate_record_id(),
            gender: (*gender).to_string(),
            count: *count,
            countries: (*country).to_string(),
            countries_code: (*code).to_string(),
            date: Utc
                .with_ymd_and_hms(*year, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_else(Utc::now),
        };
        consumption.insert(&record).await?;
    }
    tracing::info!(count = CONSUMPTION.len(), "Consumption statistics seeded");

    db.close().await;
    Ok(())
}

/// Reads `--db <path>` from the command line, if present.
fn parse_db_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1))
        .cloned()
}
