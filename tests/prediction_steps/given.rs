//! Given steps for prediction flow BDD scenarios.

use super::world::{PredictionWorld, run_async};
use crate::test_helpers::WHEAT_FORM_FIELDS;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("the reference wheat conditions")]
fn reference_wheat_conditions(world: &mut PredictionWorld) {
    for (name, value) in WHEAT_FORM_FIELDS {
        let slot = match name {
            "Rainfall_mm" => &mut world.form.rainfall_mm,
            "Temperature_Celsius" => &mut world.form.temperature_celsius,
            "Days_to_Harvest" => &mut world.form.days_to_harvest,
            "Fertilizer_Used" => &mut world.form.fertilizer_used,
            "Irrigation_Used" => &mut world.form.irrigation_used,
            "Crop" => &mut world.form.crop,
            "Region" => &mut world.form.region,
            "Soil" => &mut world.form.soil,
            _ => &mut world.form.weather,
        };
        *slot = Some(value.to_owned());
    }
}

#[given(r#"the region is "{region}""#)]
fn region_is(world: &mut PredictionWorld, region: String) {
    world.form.region = Some(region);
}

#[given(r#"the crop is "{crop}""#)]
fn crop_is(world: &mut PredictionWorld, crop: String) {
    world.form.crop = Some(crop);
}

#[given("a prediction has already been recorded")]
fn prediction_already_recorded(world: &mut PredictionWorld) -> Result<(), eyre::Report> {
    run_async(world.service.predict(&world.form)).wrap_err("record seed prediction")?;
    Ok(())
}
