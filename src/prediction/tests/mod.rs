//! Unit tests for prediction serving.


use crate::prediction::domain::{CropConditions, Crop, PredictionForm, Region, SoilType, Weather};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock that advances one second on every read.
#[derive(Debug)]
pub(super) struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub(super) fn new() -> Self {
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

/// Form for the reference wheat scenario.
pub(super) fn wheat_form() -> PredictionForm {
    PredictionForm {
        rainfall_mm: Some("120.5".to_owned()),
        temperature_celsius: Some("24.3".to_owned()),
        days_to_harvest: Some("90".to_owned()),
        fertilizer_used: Some("1".to_owned()),
        irrigation_used: Some("0".to_owned()),
        crop: Some("Wheat".to_owned()),
        region: Some("North".to_owned()),
        soil: Some("Loam".to_owned()),
        weather: Some("Sunny".to_owned()),
    }
}

/// Validated conditions matching [`wheat_form`].
pub(super) const fn wheat_conditions() -> CropConditions {
    CropConditions {
        rainfall_mm: 120.5,
        temperature_celsius: 24.3,
        days_to_harvest: 90,
        fertilizer_used: true,
        irrigation_used: false,
        region: Region::North,
        soil_type: SoilType::Loam,
        crop: Crop::Wheat,
        weather: Weather::Sunny,
    }
}
