//! Submitted growing conditions and their validated form.

use super::{Categorical, Crop, PredictionDomainError, Region, SoilType, Weather};
use serde::{Deserialize, Serialize};

/// Raw prediction form as submitted by a client.
///
/// Every field is optional so that a missing value surfaces as a
/// [`PredictionDomainError::MissingField`] instead of a transport-level
/// rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PredictionForm {
    /// Rainfall in millimetres.
    #[serde(rename = "Rainfall_mm")]
    pub rainfall_mm: Option<String>,
    /// Average temperature in degrees Celsius.
    #[serde(rename = "Temperature_Celsius")]
    pub temperature_celsius: Option<String>,
    /// Days from planting to harvest.
    #[serde(rename = "Days_to_Harvest")]
    pub days_to_harvest: Option<String>,
    /// Fertilizer flag, `0` or `1`.
    #[serde(rename = "Fertilizer_Used")]
    pub fertilizer_used: Option<String>,
    /// Irrigation flag, `0` or `1`.
    #[serde(rename = "Irrigation_Used")]
    pub irrigation_used: Option<String>,
    /// Crop literal.
    #[serde(rename = "Crop")]
    pub crop: Option<String>,
    /// Region literal.
    #[serde(rename = "Region")]
    pub region: Option<String>,
    /// Soil type literal.
    #[serde(rename = "Soil")]
    pub soil: Option<String>,
    /// Weather literal.
    #[serde(rename = "Weather")]
    pub weather: Option<String>,
}

impl PredictionForm {
    /// Validates the form into [`CropConditions`].
    ///
    /// # Errors
    ///
    /// Returns [`PredictionDomainError::MissingField`] for absent fields,
    /// [`PredictionDomainError::InvalidInput`] for numeric fields that do not
    /// parse (or are not finite), and
    /// [`PredictionDomainError::UnrecognizedCategory`] for categorical values
    /// outside their enumeration.
    pub fn parse(&self) -> Result<CropConditions, PredictionDomainError> {
        Ok(CropConditions {
            rainfall_mm: parse_real("Rainfall_mm", self.rainfall_mm.as_deref())?,
            temperature_celsius: parse_real(
                "Temperature_Celsius",
                self.temperature_celsius.as_deref(),
            )?,
            days_to_harvest: parse_integer("Days_to_Harvest", self.days_to_harvest.as_deref())?,
            fertilizer_used: parse_flag("Fertilizer_Used", self.fertilizer_used.as_deref())?,
            irrigation_used: parse_flag("Irrigation_Used", self.irrigation_used.as_deref())?,
            region: parse_category("Region", self.region.as_deref())?,
            soil_type: parse_category("Soil", self.soil.as_deref())?,
            crop: parse_category("Crop", self.crop.as_deref())?,
            weather: parse_category("Weather", self.weather.as_deref())?,
        })
    }
}

fn require<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, PredictionDomainError> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or(PredictionDomainError::MissingField { field })
}

fn parse_real(field: &'static str, value: Option<&str>) -> Result<f64, PredictionDomainError> {
    let raw = require(field, value)?;
    raw.parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| PredictionDomainError::InvalidInput {
            field,
            value: raw.to_owned(),
            expected: "a finite number",
        })
}

fn parse_integer(field: &'static str, value: Option<&str>) -> Result<i32, PredictionDomainError> {
    let raw = require(field, value)?;
    raw.parse::<i32>()
        .map_err(|_| PredictionDomainError::InvalidInput {
            field,
            value: raw.to_owned(),
            expected: "a whole number",
        })
}

fn parse_flag(field: &'static str, value: Option<&str>) -> Result<bool, PredictionDomainError> {
    let raw = require(field, value)?;
    match raw {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(PredictionDomainError::InvalidInput {
            field,
            value: raw.to_owned(),
            expected: "0 or 1",
        }),
    }
}

fn parse_category<T: Categorical>(
    field: &'static str,
    value: Option<&str>,
) -> Result<T, PredictionDomainError> {
    T::parse(require(field, value)?)
}

/// Validated growing conditions for a single prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropConditions {
    /// Rainfall in millimetres.
    pub rainfall_mm: f64,
    /// Average temperature in degrees Celsius.
    pub temperature_celsius: f64,
    /// Days from planting to harvest.
    pub days_to_harvest: i32,
    /// Whether fertilizer was applied.
    #[serde(with = "flag")]
    pub fertilizer_used: bool,
    /// Whether the field was irrigated.
    #[serde(with = "flag")]
    pub irrigation_used: bool,
    /// Growing region.
    pub region: Region,
    /// Soil classification.
    pub soil_type: SoilType,
    /// Crop grown.
    pub crop: Crop,
    /// Prevailing weather.
    pub weather: Weather,
}

/// Flags are exchanged as `0`/`1` integers, matching the storage columns.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(D::Error::custom(format!("expected 0 or 1, found {other}"))),
        }
    }
}
