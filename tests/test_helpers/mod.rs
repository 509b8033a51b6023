//! Shared fixtures for integration tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Map, Value, json};
use std::sync::atomic::{AtomicI64, Ordering};
use yieldcast::prediction::{adapters::model::LinearYieldModel, domain::FEATURE_NAMES};

/// Clock that advances one second on every read.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    /// Creates a clock starting at a fixed instant.
    pub fn new() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2026, 3, 1, 8, 0, 0)
                .single()
                .expect("valid start instant"),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick)
    }
}

/// Form fields for the reference wheat scenario, in submission order.
pub const WHEAT_FORM_FIELDS: [(&str, &str); 9] = [
    ("Rainfall_mm", "120.5"),
    ("Temperature_Celsius", "24.3"),
    ("Days_to_Harvest", "90"),
    ("Fertilizer_Used", "1"),
    ("Irrigation_Used", "0"),
    ("Crop", "Wheat"),
    ("Region", "North"),
    ("Soil", "Loam"),
    ("Weather", "Sunny"),
];

/// Encodes form fields as an `application/x-www-form-urlencoded` body.
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds a linear model artefact with zero weights except `overrides`.
pub fn model_artefact(intercept: f64, overrides: &[(&str, f64)]) -> Vec<u8> {
    let mut coefficients: Map<String, Value> = FEATURE_NAMES
        .iter()
        .map(|name| ((*name).to_owned(), json!(0.0)))
        .collect();
    for (name, weight) in overrides {
        coefficients.insert((*name).to_owned(), json!(weight));
    }
    serde_json::to_vec(&json!({
        "model_name": "integration_linear",
        "intercept": intercept,
        "coefficients": coefficients,
    }))
    .expect("artefact serializes")
}

/// Model scoring the wheat scenario at 4.37 and any other crop at 1.0.
pub fn wheat_model() -> LinearYieldModel {
    LinearYieldModel::from_slice(&model_artefact(1.0, &[("Crop_Wheat", 3.37)]))
        .expect("valid artefact")
}
