//! Diesel row models for prediction persistence.

use super::schema::predictions;
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Query result row for prediction records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = predictions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PredictionRow {
    /// Record identifier.
    pub id: i32,
    /// Rainfall in millimetres.
    pub rainfall_mm: f64,
    /// Average temperature in degrees Celsius.
    pub temperature_celsius: f64,
    /// Days from planting to harvest.
    pub days_to_harvest: i32,
    /// Fertilizer flag.
    pub fertilizer_used: i32,
    /// Irrigation flag.
    pub irrigation_used: i32,
    /// Region literal.
    pub region: String,
    /// Soil type literal.
    pub soil_type: String,
    /// Crop literal.
    pub crop: String,
    /// Weather literal.
    pub weather: String,
    /// Rounded model output.
    pub predicted_yield: f64,
    /// Insertion timestamp (UTC).
    pub created_at: NaiveDateTime,
}

/// Insert model for prediction records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = predictions)]
pub struct NewPredictionRow<'a> {
    /// Rainfall in millimetres.
    pub rainfall_mm: f64,
    /// Average temperature in degrees Celsius.
    pub temperature_celsius: f64,
    /// Days from planting to harvest.
    pub days_to_harvest: i32,
    /// Fertilizer flag.
    pub fertilizer_used: i32,
    /// Irrigation flag.
    pub irrigation_used: i32,
    /// Region literal.
    pub region: &'a str,
    /// Soil type literal.
    pub soil_type: &'a str,
    /// Crop literal.
    pub crop: &'a str,
    /// Weather literal.
    pub weather: &'a str,
    /// Rounded model output.
    pub predicted_yield: f64,
    /// Insertion timestamp (UTC).
    pub created_at: NaiveDateTime,
}
