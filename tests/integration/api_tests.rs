//! Router-level tests with stubbed outbound collaborators

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Local};
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tower::ServiceExt;

use sepilok_booking::{
    api,
    config::AppConfig,
    models::notification::BookingLogEntry,
    services::{
        facts::{FactError, FactProvider, FACT_ERROR_FALLBACK, TIP_ERROR_FALLBACK},
        notify::{BookingLogger, NotifyError},
        Services,
    },
    AppState,
};

#[derive(Clone, Default)]
struct RecordingLogger {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl BookingLogger for RecordingLogger {
    async fn log(&self, _entry: &BookingLogEntry) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(NotifyError::Timeout(std::time::Duration::from_secs(10)))
        } else {
            Ok(())
        }
    }
}

struct StubFacts {
    fail: bool,
}

#[async_trait]
impl FactProvider for StubFacts {
    async fn generate(&self, prompt: &str, _temperature: f32) -> Result<String, FactError> {
        if self.fail {
            return Err(FactError::MissingApiKey);
        }
        if prompt.contains("travel advice") {
            Ok("Pack a light raincoat.".to_string())
        } else {
            Ok("Orangutans build a new nest every night.".to_string())
        }
    }
}

fn app_with(logger: RecordingLogger, facts_fail: bool) -> Router {
    let config = AppConfig::default();
    let services = Services::with_collaborators(
        &config,
        Arc::new(logger),
        Arc::new(StubFacts { fail: facts_fail }),
    );
    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn new_session(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/v1/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app_with(RecordingLogger::default(), false);
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_catalog_lists_experiences_and_timeslots() {
    let app = app_with(RecordingLogger::default(), false);
    let (status, body) = send(&app, "GET", "/api/v1/catalog", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["experiences"].as_array().unwrap().len(), 3);
    assert_eq!(body["experiences"][2]["id"], "COMBO");
    assert_eq!(body["experiences"][2]["prices"]["adult"], 50);
    assert_eq!(body["timeslots"], json!(["09:00 AM", "11:00 AM", "02:00 PM", "03:30 PM"]));
    assert_eq!(body["require_visitor_name"], true);
}

#[tokio::test]
async fn test_new_session_defaults() {
    let app = app_with(RecordingLogger::default(), false);
    let (_, body) = send(&app, "POST", "/api/v1/sessions", None).await;

    assert_eq!(body["experience"], "ORANGUTAN");
    assert_eq!(body["timeslot"], "09:00 AM");
    assert_eq!(body["adults"], 1);
    assert_eq!(body["children"], 0);
    assert_eq!(body["visitor_name"], "");
    assert_eq!(body["total"], 30);
    assert_eq!(body["phase"], "idle");
    assert_eq!(body["date"], Local::now().date_naive().format("%Y-%m-%d").to_string());
}

#[tokio::test]
async fn test_orangutan_two_adults_one_child_totals_75() {
    let app = app_with(RecordingLogger::default(), false);
    let id = new_session(&app).await;

    send(
        &app,
        "PUT",
        &format!("/api/v1/sessions/{}/experience", id),
        Some(json!({ "experience": "ORANGUTAN" })),
    )
    .await;
    send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/counts", id),
        Some(json!({ "category": "adult", "delta": 1 })),
    )
    .await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/sessions/{}/counts", id),
        Some(json!({ "category": "child", "delta": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["adults"], 2);
    assert_eq!(body["children"], 1);
    assert_eq!(body["total"], 75);
}

#[tokio::test]
async fn test_combo_single_adult_totals_50() {
    let app = app_with(RecordingLogger::default(), false);
    let id = new_session(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/sessions/{}/experience", id),
        Some(json!({ "experience": "COMBO" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 50);
    assert_eq!(body["experience_name"], "Rainforest Combo");
}

#[tokio::test]
async fn test_double_decrement_keeps_one_adult() {
    let app = app_with(RecordingLogger::default(), false);
    let id = new_session(&app).await;
    let uri = format!("/api/v1/sessions/{}/counts", id);

    send(&app, "POST", &uri, Some(json!({ "category": "adult", "delta": -1 }))).await;
    let (status, body) = send(&app, "POST", &uri, Some(json!({ "category": "adult", "delta": -1 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["adults"], 1);

    let (_, body) = send(&app, "POST", &uri, Some(json!({ "category": "child", "delta": -100 }))).await;
    assert_eq!(body["children"], 0);
}

#[tokio::test]
async fn test_unknown_experience_and_timeslot_rejected() {
    let app = app_with(RecordingLogger::default(), false);
    let id = new_session(&app).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/v1/sessions/{}/experience", id),
        Some(json!({ "experience": "TIGER" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/v1/sessions/{}/timeslot", id),
        Some(json!({ "timeslot": "10:00 PM" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_past_date_rejected_future_date_accepted() {
    let app = app_with(RecordingLogger::default(), false);
    let id = new_session(&app).await;
    let uri = format!("/api/v1/sessions/{}/date", id);
    let today = Local::now().date_naive();

    let yesterday = (today - Duration::days(1)).format("%Y-%m-%d").to_string();
    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "date": yesterday }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let next_week = (today + Duration::days(7)).format("%Y-%m-%d").to_string();
    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "date": next_week }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], next_week);
}

#[tokio::test]
async fn test_whitespace_name_blocks_submission_without_calls() {
    let logger = RecordingLogger::default();
    let calls = logger.calls.clone();
    let app = app_with(logger, false);
    let id = new_session(&app).await;

    send(
        &app,
        "PUT",
        &format!("/api/v1/sessions/{}/visitor-name", id),
        Some(json!({ "visitor_name": " " })),
    )
    .await;
    let (status, body) = send(&app, "POST", &format!("/api/v1/sessions/{}/submit", id), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter your name before booking.");
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let (_, body) = send(&app, "GET", &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(body["phase"], "idle");
}

#[tokio::test]
async fn test_failing_log_still_returns_handoff() {
    let logger = RecordingLogger {
        calls: Arc::new(AtomicUsize::new(0)),
        fail: true,
    };
    let calls = logger.calls.clone();
    let app = app_with(logger, false);
    let id = new_session(&app).await;

    send(
        &app,
        "PUT",
        &format!("/api/v1/sessions/{}/visitor-name", id),
        Some(json!({ "visitor_name": "Aminah" })),
    )
    .await;
    let (status, body) = send(&app, "POST", &format!("/api/v1/sessions/{}/submit", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(body["logged"], false);
    let url = body["handoff_url"].as_str().unwrap();
    assert!(url.starts_with("https://wa.me/60123109793?text=Hello%20Sepilok%20Admin"));
    assert!(url.contains("Aminah"));
    assert!(body["message"].as_str().unwrap().contains("💰 Total: RM 30"));

    let (_, body) = send(&app, "GET", &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(body["phase"], "idle");
}

#[tokio::test]
async fn test_insights_fall_back_when_provider_fails() {
    let app = app_with(RecordingLogger::default(), true);
    let (status, body) = send(&app, "GET", "/api/v1/insights?experience=SUNBEAR&date=2026-12-01", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fact"], FACT_ERROR_FALLBACK);
    assert_eq!(body["tip"], TIP_ERROR_FALLBACK);
}

#[tokio::test]
async fn test_insights_success() {
    let app = app_with(RecordingLogger::default(), false);
    let (status, body) = send(&app, "GET", "/api/v1/insights?experience=ORANGUTAN", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fact"], "Orangutans build a new nest every night.");
    assert_eq!(body["tip"], "Pack a light raincoat.");
}

#[tokio::test]
async fn test_quote() {
    let app = app_with(RecordingLogger::default(), false);
    let (status, body) = send(&app, "GET", "/api/v1/quote?experience=ORANGUTAN&adults=2&children=1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 75);
    assert_eq!(body["currency"], "RM");
}

#[tokio::test]
async fn test_ended_session_is_gone() {
    let app = app_with(RecordingLogger::default(), false);
    let id = new_session(&app).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchSession");
}

#[tokio::test]
async fn test_restart_resets_selection() {
    let app = app_with(RecordingLogger::default(), false);
    let id = new_session(&app).await;

    send(
        &app,
        "PUT",
        &format!("/api/v1/sessions/{}/experience", id),
        Some(json!({ "experience": "SUNBEAR" })),
    )
    .await;
    let (status, body) = send(&app, "POST", &format!("/api/v1/sessions/{}/restart", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["experience"], "ORANGUTAN");
    assert_eq!(body["total"], 30);
}
