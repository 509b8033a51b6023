//! Router-level tests for the HTTP surface.
//!
//! Requests are driven through the router with `tower::ServiceExt::oneshot`
//! against an in-memory store and a linear model built from a test artefact.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod test_helpers;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use rstest::{fixture, rstest};
use serde_json::Value;
use test_helpers::{SteppingClock, WHEAT_FORM_FIELDS, form_body, wheat_model};
use tower::ServiceExt;
use yieldcast::{
    prediction::{
        adapters::{memory::InMemoryPredictionRepository, model::LinearYieldModel},
        services::PredictionService,
    },
    web::{AppState, Templates, create_router},
};

type TestState = AppState<InMemoryPredictionRepository, LinearYieldModel>;

#[fixture]
fn state() -> TestState {
    let repository = Arc::new(InMemoryPredictionRepository::with_clock(Arc::new(
        SteppingClock::new(),
    )));
    let service = PredictionService::new(repository, Arc::new(wheat_model()));
    AppState::new(service, Arc::new(Templates::new().expect("templates compile")))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn post_form(fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict_form")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body(fields)))
        .expect("request builds")
}

async fn send(router: &Router, request: Request<Body>) -> Response {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("json body")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_history_reports_zero_predictions(state: TestState) {
    let router = create_router(state);

    let response = send(&router, get("/history")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.get("total_predictions"), Some(&Value::from(0)));
    assert_eq!(body.get("history"), Some(&Value::Array(Vec::new())));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn form_submission_renders_result_and_is_recorded(state: TestState) {
    let router = create_router(state);

    let response = send(&router, post_form(&WHEAT_FORM_FIELDS)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("4.37"), "page should show the yield");
    assert!(page.contains("High Yield"), "page should show the tier");

    let history = body_json(send(&router, get("/history")).await).await;
    assert_eq!(history.get("total_predictions"), Some(&Value::from(1)));
    let first = history
        .get("history")
        .and_then(|rows| rows.get(0))
        .expect("one history row");
    assert_eq!(first.get("id"), Some(&Value::from(1)));
    assert_eq!(first.get("crop"), Some(&Value::from("Wheat")));
    assert_eq!(first.get("fertilizer_used"), Some(&Value::from(1)));
    assert_eq!(first.get("predicted_yield"), Some(&Value::from(4.37)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_submission_shows_error_and_stores_nothing(state: TestState) {
    let router = create_router(state);
    let fields: Vec<(&str, &str)> = WHEAT_FORM_FIELDS
        .iter()
        .map(|&(name, value)| if name == "Region" { (name, "East") } else { (name, value) })
        .collect();

    let response = send(&router, post_form(&fields)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("East"), "page should name the rejected value");

    let history = body_json(send(&router, get("/history")).await).await;
    assert_eq!(history.get("total_predictions"), Some(&Value::from(0)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undecodable_form_body_still_renders_history(state: TestState) {
    let router = create_router(state);
    send(&router, post_form(&WHEAT_FORM_FIELDS)).await;
    let mut duplicated = WHEAT_FORM_FIELDS.to_vec();
    duplicated.push(("Crop", "Maize"));

    let response = send(&router, post_form(&duplicated)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Error:"), "page should show the decode error");
    assert!(page.contains("Crop"), "error should name the field");
    assert!(page.contains("4.37"), "page should list the stored prediction");
    assert!(page.contains("Prediction history (1)"));

    let history = body_json(send(&router, get("/history")).await).await;
    assert_eq!(history.get("total_predictions"), Some(&Value::from(1)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn form_without_content_type_still_renders_history(state: TestState) {
    let router = create_router(state);
    send(&router, post_form(&WHEAT_FORM_FIELDS)).await;
    let request = Request::builder()
        .method("POST")
        .uri("/predict_form")
        .body(Body::from(form_body(&WHEAT_FORM_FIELDS)))
        .expect("request builds");

    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Error:"));
    assert!(page.contains("Prediction history (1)"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn visualize_annotates_only_the_latest_prediction(state: TestState) {
    let router = create_router(state);
    let maize: Vec<(&str, &str)> = WHEAT_FORM_FIELDS
        .iter()
        .map(|&(name, value)| if name == "Crop" { (name, "Maize") } else { (name, value) })
        .collect();
    send(&router, post_form(&WHEAT_FORM_FIELDS)).await;
    send(&router, post_form(&maize)).await;

    let response = send(&router, get("/visualize")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Low Yield"), "latest maize prediction is low");
    assert_eq!(page.matches("\"yield_level\"").count(), 1);
    assert!(!page.contains("<canvas"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn home_page_offers_every_category(state: TestState) {
    let router = create_router(state);

    let page = body_text(send(&router, get("/")).await).await;
    for literal in ["North", "Peaty", "Soybean", "Rainy"] {
        assert!(page.contains(literal), "form should offer {literal}");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_reports_loaded_model(state: TestState) {
    let router = create_router(state);

    let body = body_json(send(&router, get("/health")).await).await;
    assert_eq!(body.get("status"), Some(&Value::from("ok")));
    assert_eq!(
        body.pointer("/model/name"),
        Some(&Value::from("integration_linear"))
    );
}
