//! # Alcohol Consumption Routes
//!
//! Read-mostly statistics table with admin CRUD. Wire field names keep the
//! original dataset's capitalized headers (`Gender`, `Count`, `Countries`,
//! `CountriesCode`, `Date`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use licoreria_core::validation::validate_required;
use licoreria_core::ConsumptionRecord;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Body of `POST /api/alcohol-consumption`.
///
/// String fields default to empty so an absent field reports "x is
/// required" (400) instead of a bare deserialization rejection; an absent
/// `Date` is stamped with the current time.
#[derive(Debug, Deserialize)]
pub struct CreateConsumptionRequest {
    #[serde(rename = "Gender", default)]
    pub gender: String,
    #[serde(rename = "Count")]
    pub count: f64,
    #[serde(rename = "Countries", default)]
    pub countries: String,
    #[serde(rename = "CountriesCode", default)]
    pub countries_code: String,
    #[serde(rename = "Date", default = "Utc::now")]
    pub date: DateTime<Utc>,
}

impl CreateConsumptionRequest {
    fn into_record(self) -> Result<ConsumptionRecord, ApiError> {
        validate_required("Gender", &self.gender)?;
        validate_required("Countries", &self.countries)?;
        validate_required("CountriesCode", &self.countries_code)?;

        Ok(ConsumptionRecord {
            id: Uuid::new_v4().to_string(),
            gender: self.gender,
            count: self.count,
            countries: self.countries,
            countries_code: self.countries_code,
            date: self.date,
        })
    }
}

/// Body of `PATCH /api/alcohol-consumption/{id}`. Absent fields keep their
/// stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateConsumptionRequest {
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Count")]
    pub count: Option<f64>,
    #[serde(rename = "Countries")]
    pub countries: Option<String>,
    #[serde(rename = "CountriesCode")]
    pub countries_code: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<DateTime<Utc>>,
}

impl UpdateConsumptionRequest {
    fn apply_to(self, record: &mut ConsumptionRecord) -> Result<(), ApiError> {
        if let Some(gender) = self.gender {
            validate_required("Gender", &gender)?;
            record.gender = gender;
        }
        if let Some(count) = self.count {
            record.count = count;
        }
        if let Some(countries) = self.countries {
            validate_required("Countries", &countries)?;
            record.countries = countries;
        }
        if let Some(countries_code) = self.countries_code {
            validate_required("CountriesCode", &countries_code)?;
            record.countries_code = countries_code;
        }
        if let Some(date) = self.date {
            record.date = date;
        }
        Ok(())
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/alcohol-consumption` — the whole table.
pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConsumptionRecord>>, ApiError> {
    let records = state.db.consumption().list().await?;
    Ok(Json(records))
}

/// `GET /api/alcohol-consumption/country/{country}`.
pub async fn list_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<Vec<ConsumptionRecord>>, ApiError> {
    let records = state.db.consumption().list_by_country(&country).await?;
    Ok(Json(records))
}

/// `POST /api/alcohol-consumption` — add a record.
pub async fn create_record(
    State(state): State<AppState>,
    Json(request): Json<CreateConsumptionRequest>,
) -> Result<(StatusCode, Json<ConsumptionRecord>), ApiError> {
    let record = request.into_record()?;
    let created = state.db.consumption().insert(&record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /api/alcohol-consumption/{id}` — merge the provided fields.
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateConsumptionRequest>,
) -> Result<Json<ConsumptionRecord>, ApiError> {
    let mut record = state
        .db
        .consumption()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("ConsumptionRecord", &id))?;

    request.apply_to(&mut record)?;
    state.db.consumption().update(&record).await?;

    Ok(Json(record))
}

/// `DELETE /api/alcohol-consumption/{id}`.
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.db.consumption().delete(&id).await?;
    Ok(Json(json!({ "message": "Deleted consumption data" })))
}
