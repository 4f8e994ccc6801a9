//! # Consumption Repository
//!
//! Database operations for the alcohol-consumption statistics table.
//!
//! Read-mostly: the storefront renders the full table or a per-country
//! slice; admin edits are occasional.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use licoreria_core::ConsumptionRecord;

const CONSUMPTION_COLUMNS: &str = "id, gender, count, countries, countries_code, date";

/// Repository for consumption statistics.
#[derive(Debug, Clone)]
pub struct ConsumptionRepository {
    pool: SqlitePool,
}

impl ConsumptionRepository {
    /// Creates a new ConsumptionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ConsumptionRepository { pool }
    }

    /// Lists every record.
    pub async fn list(&self) -> DbResult<Vec<ConsumptionRecord>> {
        let sql = format!("SELECT {CONSUMPTION_COLUMNS} FROM alcohol_consumption ORDER BY date");
        let records = sqlx::query_as::<_, ConsumptionRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = records.len(), "Listed consumption records");
        Ok(records)
    }

    /// Lists the records for one country (exact name match).
    pub async fn list_by_country(&self, country: &str) -> DbResult<Vec<ConsumptionRecord>> {
        let sql = format!(
            "SELECT {CONSUMPTION_COLUMNS} FROM alcohol_consumption \
             WHERE countries = ?1 ORDER BY date"
        );
        let records = sqlx::query_as::<_, ConsumptionRecord>(&sql)
            .bind(country)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Gets a record by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<ConsumptionRecord>> {
        let sql = format!("SELECT {CONSUMPTION_COLUMNS} FROM alcohol_consumption WHERE id = ?1");
        let record = sqlx::query_as::<_, ConsumptionRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Inserts a new record.
    pub async fn insert(&self, record: &ConsumptionRecord) -> DbResult<ConsumptionRecord> {
        debug!(id = %record.id, country = %record.countries, "Inserting consumption record");

        sqlx::query(
            "INSERT INTO alcohol_consumption (id, gender, count, countries, countries_code, date) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&record.id)
        .bind(&record.gender)
        .bind(record.count)
        .bind(&record.countries)
        .bind(&record.countries_code)
        .bind(record.date)
        .execute(&self.pool)
        .await?;

        Ok(record.clone())
    }

    /// Updates an existing record (full row by id).
    pub async fn update(&self, record: &ConsumptionRecord) -> DbResult<()> {
        debug!(id = %record.id, "Updating consumption record");

        let result = sqlx::query(
            "UPDATE alcohol_consumption SET \
                gender = ?2, count = ?3, countries = ?4, countries_code = ?5, date = ?6 \
             WHERE id = ?1",
        )
        .bind(&record.id)
        .bind(&record.gender)
        .bind(record.count)
        .bind(&record.countries)
        .bind(&record.countries_code)
        .bind(record.date)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ConsumptionRecord", &record.id));
        }

        Ok(())
    }

    /// Deletes a record.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting consumption record");

        let result = sqlx::query("DELETE FROM alcohol_consumption WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ConsumptionRecord", id));
        }

        Ok(())
    }
}

/// Helper to generate a new record ID.
pub fn generate_record_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
