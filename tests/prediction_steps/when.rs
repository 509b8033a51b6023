//! When steps for prediction flow BDD scenarios.

use super::world::{PredictionWorld, run_async};
use rstest_bdd_macros::when;

#[when("the conditions are submitted")]
fn conditions_submitted(world: &mut PredictionWorld) {
    world.last_report = Some(run_async(world.service.submit(&world.form)));
}
