//! HTTP surface for the prediction service.
//!
//! ## Endpoints
//!
//! - `GET /` - Prediction form and history
//! - `POST /predict_form` - Score a submitted form and show the result
//! - `GET /history` - JSON history (`{ total_predictions, history }`)
//! - `GET /visualize` - Dashboard annotated with the latest yield tier
//! - `GET /health` - Liveness and loaded model identity

mod templates;

pub use templates::{INDEX_TEMPLATE, Templates, VISUALIZE_TEMPLATE};

use crate::prediction::{
    domain::{
        Categorical, Crop, PredictionForm, PredictionRecord, Region, SoilType, Weather,
        YieldInterpretation,
    },
    ports::{PredictionRepository, YieldModel},
    services::{PredictionService, PredictionServiceError},
};
use axum::{
    Form, Json, Router,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use minijinja::context;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, instrument, warn};

/// Shared state for request handlers.
pub struct AppState<R, M>
where
    R: PredictionRepository,
    M: YieldModel,
{
    service: PredictionService<R, M>,
    templates: Arc<Templates>,
}

impl<R, M> AppState<R, M>
where
    R: PredictionRepository,
    M: YieldModel,
{
    /// Creates handler state from a service and compiled templates.
    #[must_use]
    pub const fn new(service: PredictionService<R, M>, templates: Arc<Templates>) -> Self {
        Self { service, templates }
    }
}

impl<R, M> Clone for AppState<R, M>
where
    R: PredictionRepository,
    M: YieldModel,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            templates: Arc::clone(&self.templates),
        }
    }
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum WebError {
    /// The prediction service failed.
    #[error(transparent)]
    Service(#[from] PredictionServiceError),
    /// A page template failed to render.
    #[error("failed to render page: {0}")]
    Render(#[from] minijinja::Error),
    /// History could not be encoded for the page.
    #[error("failed to encode history: {0}")]
    Encode(#[from] serde_json::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Service(PredictionServiceError::Repository(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Service(PredictionServiceError::Domain(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Service(PredictionServiceError::Model(_))
            | Self::Render(_)
            | Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!(error = %self, status = status.as_u16(), "request failed");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Builds the application router.
pub fn create_router<R, M>(state: AppState<R, M>) -> Router
where
    R: PredictionRepository + 'static,
    M: YieldModel + 'static,
{
    Router::new()
        .route("/", get(home_handler::<R, M>))
        .route("/predict_form", post(predict_form_handler::<R, M>))
        .route("/history", get(history_handler::<R, M>))
        .route("/visualize", get(visualize_handler::<R, M>))
        .route("/health", get(health_handler::<R, M>))
        .with_state(state)
}

/// Categorical choices offered by the form.
#[derive(Debug, Serialize)]
struct FormOptions {
    regions: Vec<&'static str>,
    soils: Vec<&'static str>,
    crops: Vec<&'static str>,
    weather: Vec<&'static str>,
}

impl FormOptions {
    fn enumerated() -> Self {
        Self {
            regions: Region::literals(),
            soils: SoilType::literals(),
            crops: Crop::literals(),
            weather: Weather::literals(),
        }
    }
}

#[instrument(skip_all)]
async fn home_handler<R, M>(
    State(state): State<AppState<R, M>>,
) -> Result<Html<String>, WebError>
where
    R: PredictionRepository + 'static,
    M: YieldModel + 'static,
{
    let snapshot = state.service.history().await?;
    let page = state.templates.render(
        INDEX_TEMPLATE,
        context! {
            options => FormOptions::enumerated(),
            prediction_history => snapshot.history,
            errors => Vec::<String>::new(),
        },
    )?;
    Ok(Html(page))
}

#[instrument(skip_all)]
async fn predict_form_handler<R, M>(
    State(state): State<AppState<R, M>>,
    form: Result<Form<PredictionForm>, FormRejection>,
) -> Result<Html<String>, WebError>
where
    R: PredictionRepository + 'static,
    M: YieldModel + 'static,
{
    let report = match form {
        Ok(Form(form)) => state.service.submit(&form).await,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "form body rejected");
            state.service.failed_submission(rejection.body_text()).await
        }
    };
    let prediction = report
        .scored
        .map(|scored| scored.record.predicted_yield().to_string());
    let yield_info = report.scored.map(|scored| scored.interpretation);
    let page = state.templates.render(
        INDEX_TEMPLATE,
        context! {
            options => FormOptions::enumerated(),
            prediction => prediction,
            yield_info => yield_info,
            prediction_history => report.history,
            errors => report.errors,
        },
    )?;
    Ok(Html(page))
}

#[instrument(skip_all)]
async fn history_handler<R, M>(
    State(state): State<AppState<R, M>>,
) -> Result<Response, WebError>
where
    R: PredictionRepository + 'static,
    M: YieldModel + 'static,
{
    let snapshot = state.service.history().await?;
    Ok(Json(snapshot).into_response())
}

#[instrument(skip_all)]
async fn visualize_handler<R, M>(
    State(state): State<AppState<R, M>>,
) -> Result<Html<String>, WebError>
where
    R: PredictionRepository + 'static,
    M: YieldModel + 'static,
{
    let report = state.service.visualization().await?;
    let rows = annotate_latest(&report.history, report.latest)?;
    // `</` would end the inline script element early.
    let history_json = serde_json::to_string(&rows)?.replace("</", "<\\/");
    let page = state.templates.render(
        VISUALIZE_TEMPLATE,
        context! {
            prediction_history => rows,
            history_json => history_json,
        },
    )?;
    Ok(Html(page))
}

async fn health_handler<R, M>(State(state): State<AppState<R, M>>) -> Json<Value>
where
    R: PredictionRepository + 'static,
    M: YieldModel + 'static,
{
    Json(json!({
        "status": "ok",
        "model": state.service.model_descriptor(),
    }))
}

/// Serializes history rows, adding `yield_level`, `yield_message` and
/// `yield_tip` to the newest one.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when a record fails to serialize.
pub fn annotate_latest(
    history: &[PredictionRecord],
    latest: Option<YieldInterpretation>,
) -> Result<Vec<Value>, serde_json::Error> {
    let mut rows = history
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    if let (Some(Value::Object(first)), Some(info)) = (rows.first_mut(), latest) {
        first.insert("yield_level".to_owned(), Value::from(info.level));
        first.insert("yield_message".to_owned(), Value::from(info.message));
        first.insert("yield_tip".to_owned(), Value::from(info.tip));
    }
    Ok(rows)
}
