//! Fixed-order feature vector consumed by the yield model.

use super::{CropConditions, Crop, Region, SoilType, Weather};
use serde::Serialize;

/// Number of slots in a [`FeatureVector`].
pub const FEATURE_COUNT: usize = 20;

/// Feature names in the exact column order the model was trained against.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Rainfall_mm",
    "Temperature_Celsius",
    "Fertilizer_Used",
    "Irrigation_Used",
    "Days_to_Harvest",
    "Region_North",
    "Region_South",
    "Region_West",
    "Soil_Type_Clay",
    "Soil_Type_Loam",
    "Soil_Type_Peaty",
    "Soil_Type_Sandy",
    "Soil_Type_Silt",
    "Crop_Cotton",
    "Crop_Maize",
    "Crop_Rice",
    "Crop_Soybean",
    "Crop_Wheat",
    "Weather_Condition_Rainy",
    "Weather_Condition_Sunny",
];

/// Model input: five raw numeric fields followed by the region, soil, crop
/// and weather one-hot blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Encodes validated conditions into model input.
    ///
    /// Each one-hot block has exactly one slot set, because the categorical
    /// fields are closed enumerations.
    #[must_use]
    pub fn encode(conditions: &CropConditions) -> Self {
        let CropConditions {
            rainfall_mm,
            temperature_celsius,
            days_to_harvest,
            fertilizer_used,
            irrigation_used,
            region,
            soil_type,
            crop,
            weather,
        } = *conditions;

        Self([
            rainfall_mm,
            temperature_celsius,
            hot(fertilizer_used),
            hot(irrigation_used),
            f64::from(days_to_harvest),
            hot(region == Region::North),
            hot(region == Region::South),
            hot(region == Region::West),
            hot(soil_type == SoilType::Clay),
            hot(soil_type == SoilType::Loam),
            hot(soil_type == SoilType::Peaty),
            hot(soil_type == SoilType::Sandy),
            hot(soil_type == SoilType::Silt),
            hot(crop == Crop::Cotton),
            hot(crop == Crop::Maize),
            hot(crop == Crop::Rice),
            hot(crop == Crop::Soybean),
            hot(crop == Crop::Wheat),
            hot(weather == Weather::Rainy),
            hot(weather == Weather::Sunny),
        ])
    }

    /// Returns the slot values in model order.
    #[must_use]
    pub const fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Looks up a slot by its feature name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .and_then(|index| self.0.get(index).copied())
    }

    /// Iterates over `(feature name, value)` pairs in model order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

const fn hot(selected: bool) -> f64 {
    if selected { 1.0 } else { 0.0 }
}
