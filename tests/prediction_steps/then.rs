//! Then steps for prediction flow BDD scenarios.

use super::world::{PredictionWorld, run_async};
use rstest_bdd_macros::then;
use yieldcast::prediction::{
    domain::Categorical,
    services::{ScoredPrediction, SubmissionReport},
};

fn last_report(world: &PredictionWorld) -> Result<&SubmissionReport, eyre::Report> {
    world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no submission in scenario world"))
}

fn last_scored(world: &PredictionWorld) -> Result<ScoredPrediction, eyre::Report> {
    let report = last_report(world)?;
    report
        .scored
        .ok_or_else(|| eyre::eyre!("submission failed: {:?}", report.errors))
}

#[then(r#"the prediction is recorded with yield "{expected}""#)]
fn recorded_with_yield(world: &PredictionWorld, expected: String) -> Result<(), eyre::Report> {
    let scored = last_scored(world)?;
    let shown = scored.record.predicted_yield().to_string();
    if shown != expected {
        return Err(eyre::eyre!("expected yield {expected}, found {shown}"));
    }
    Ok(())
}

#[then(r#"the yield tier is "{tier}""#)]
fn yield_tier_is(world: &PredictionWorld, tier: String) -> Result<(), eyre::Report> {
    let scored = last_scored(world)?;
    let actual = scored.interpretation.tier.as_str();
    if actual != tier {
        return Err(eyre::eyre!("expected tier {tier}, found {actual}"));
    }
    Ok(())
}

#[then("the submission reports an unrecognized region")]
fn reports_unrecognized_region(world: &PredictionWorld) -> Result<(), eyre::Report> {
    let report = last_report(world)?;
    if report.scored.is_some() {
        return Err(eyre::eyre!("expected the submission to be rejected"));
    }
    if !report
        .errors
        .iter()
        .any(|message| message.contains("unrecognized region"))
    {
        return Err(eyre::eyre!(
            "expected an unrecognized region error, got {:?}",
            report.errors
        ));
    }
    Ok(())
}

#[then("the history holds {count:usize} predictions")]
fn history_holds(world: &PredictionWorld, count: usize) -> Result<(), eyre::Report> {
    let snapshot = run_async(world.service.history())
        .map_err(|err| eyre::eyre!("history failed: {err}"))?;
    if snapshot.total_predictions != count || snapshot.history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} predictions, found {}",
            snapshot.total_predictions
        ));
    }
    Ok(())
}

#[then(r#"the newest prediction is for "{crop}""#)]
fn newest_prediction_is_for(world: &PredictionWorld, crop: String) -> Result<(), eyre::Report> {
    let snapshot = run_async(world.service.history())
        .map_err(|err| eyre::eyre!("history failed: {err}"))?;
    let newest = snapshot
        .history
        .first()
        .ok_or_else(|| eyre::eyre!("history is empty"))?;
    let actual = newest.conditions().crop.as_str();
    if actual != crop {
        return Err(eyre::eyre!("expected newest crop {crop}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the visualization tier is "{tier}""#)]
fn visualization_tier_is(world: &PredictionWorld, tier: String) -> Result<(), eyre::Report> {
    let report = run_async(world.service.visualization())
        .map_err(|err| eyre::eyre!("visualization failed: {err}"))?;
    let actual = report
        .latest
        .map(|info| info.tier.as_str())
        .ok_or_else(|| eyre::eyre!("no latest prediction"))?;
    if actual != tier {
        return Err(eyre::eyre!("expected tier {tier}, found {actual}"));
    }
    Ok(())
}
