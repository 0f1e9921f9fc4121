use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::runtime::Handle;

use bi_dashboard::api::{ApiClient, ApiError, Resource};
use bi_dashboard::app::{App, LoadOutcome, Loader};
use bi_dashboard::config::DashboardConfig;
use bi_dashboard::types::{
    ExecutiveSummary, FinancialOverview, HrAnalytics, RdStatus, SecurityMetrics,
    SupplyChainPerformance,
};

const EXECUTIVE_SUMMARY: &str = include_str!("fixtures/executive_summary.json");
const FINANCIAL_OVERVIEW: &str = include_str!("fixtures/financial_overview.json");
const SECURITY_METRICS: &str = include_str!("fixtures/security_metrics.json");
const RD_STATUS: &str = include_str!("fixtures/rd_status.json");
const SUPPLY_CHAIN: &str = include_str!("fixtures/supply_chain.json");
const HR_ANALYTICS: &str = include_str!("fixtures/hr_analytics.json");
/// Backend shape for a division with no budget: whole numbers without a fraction
const RD_STATUS_UNFUNDED: &str = include_str!("fixtures/rd_status_unfunded.json");

/// Switches that make the fixture server misbehave.
#[derive(Default)]
struct Faults {
    fail_security: AtomicBool,
    malformed_rd: AtomicBool,
    unfunded_rd: AtomicBool,
    delay_ms: AtomicU64,
}

fn fixture(path: &str) -> Option<&'static str> {
    match path {
        "/api/executive-summary" => Some(EXECUTIVE_SUMMARY),
        "/api/financial-overview" => Some(FINANCIAL_OVERVIEW),
        "/api/security-metrics" => Some(SECURITY_METRICS),
        "/api/rd-status" => Some(RD_STATUS),
        "/api/supply-chain" => Some(SUPPLY_CHAIN),
        "/api/hr-analytics" => Some(HR_ANALYTICS),
        _ => None,
    }
}

fn json(body: &'static str) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn serve_fixture(State(faults): State<Arc<Faults>>, uri: Uri) -> Response {
    let delay = faults.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let path = uri.path();
    if path == "/api/security-metrics" && faults.fail_security.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if path == "/api/rd-status" && faults.malformed_rd.load(Ordering::SeqCst) {
        return json(r#"{"project_status": 12}"#);
    }
    if path == "/api/rd-status" && faults.unfunded_rd.load(Ordering::SeqCst) {
        return json(RD_STATUS_UNFUNDED);
    }

    match fixture(path) {
        Some(body) => json(body),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Start the fixture server on an ephemeral port and return a client for it.
async fn start_server() -> (ApiClient, Arc<Faults>) {
    let faults = Arc::new(Faults::default());
    let app = Router::new()
        .fallback(serve_fixture)
        .with_state(Arc::clone(&faults));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    let config = DashboardConfig::with_base_url(&format!("http://{addr}")).unwrap();
    (ApiClient::new(&config).unwrap(), faults)
}

fn new_loader(client: ApiClient) -> (Loader, Arc<Mutex<App>>) {
    let app = Arc::new(Mutex::new(App::default()));
    let loader = Loader::new(client, Arc::clone(&app), Handle::current());
    (loader, app)
}

/// Structural JSON equality where `0` and `0.0` are the same number.
fn json_matches(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| json_matches(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, a)| b.get(key).is_some_and(|b| json_matches(a, b)))
        }
        _ => actual == expected,
    }
}

async fn assert_round_trip<R: Resource + Serialize>(client: &ApiClient, body: &str) {
    let fetched: R = client.fetch().await.unwrap();
    let actual = serde_json::to_value(&fetched).unwrap();
    let expected: Value = serde_json::from_str(body).unwrap();
    assert!(
        json_matches(&actual, &expected),
        "{}: {actual} != {expected}",
        R::PATH
    );
}

#[tokio::test]
async fn test_resources_round_trip() {
    let (client, _) = start_server().await;

    assert_round_trip::<ExecutiveSummary>(&client, EXECUTIVE_SUMMARY).await;
    assert_round_trip::<FinancialOverview>(&client, FINANCIAL_OVERVIEW).await;
    assert_round_trip::<SecurityMetrics>(&client, SECURITY_METRICS).await;
    assert_round_trip::<RdStatus>(&client, RD_STATUS).await;
    assert_round_trip::<SupplyChainPerformance>(&client, SUPPLY_CHAIN).await;
    assert_round_trip::<HrAnalytics>(&client, HR_ANALYTICS).await;
}

#[tokio::test]
async fn test_whole_number_floats_round_trip() {
    let (client, faults) = start_server().await;
    faults.unfunded_rd.store(true, Ordering::SeqCst);

    assert_round_trip::<RdStatus>(&client, RD_STATUS_UNFUNDED).await;

    let status = client.rd_status().await.unwrap();
    assert_eq!(status.budget_analysis[0].utilization, 0.0);
    assert_eq!(status.timeline_adherence[0].adherence, 100.0);
}

#[test]
fn test_json_matching_is_numeric_but_strict() {
    let integer: Value = serde_json::from_str(r#"{"a": [0, 75]}"#).unwrap();
    let float: Value = serde_json::from_str(r#"{"a": [0.0, 75.0]}"#).unwrap();
    let other: Value = serde_json::from_str(r#"{"a": [0.0, 75.5]}"#).unwrap();
    let extra: Value = serde_json::from_str(r#"{"a": [0, 75], "b": 1}"#).unwrap();

    assert!(json_matches(&float, &integer));
    assert!(!json_matches(&other, &integer));
    assert!(!json_matches(&extra, &integer));
}

#[tokio::test]
async fn test_fetch_snapshot() {
    let (client, _) = start_server().await;

    let snapshot = client.fetch_snapshot().await.unwrap();
    assert_eq!(snapshot.executive_summary.total_employees, 45_210);
    assert_eq!(
        snapshot.security_metrics,
        serde_json::from_str::<SecurityMetrics>(SECURITY_METRICS).unwrap()
    );
}

#[tokio::test]
async fn test_one_failure_fails_the_batch() {
    let (client, faults) = start_server().await;
    faults.fail_security.store(true, Ordering::SeqCst);

    let err = client.fetch_snapshot().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.endpoint(), Some("/api/security-metrics"));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let (client, faults) = start_server().await;
    faults.malformed_rd.store(true, Ordering::SeqCst);

    let err = client.rd_status().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse { endpoint: "/api/rd-status", .. }));
}

#[tokio::test]
async fn test_load_error_then_retry() {
    let (client, faults) = start_server().await;
    faults.fail_security.store(true, Ordering::SeqCst);
    let (loader, app) = new_loader(client);

    assert_eq!(loader.load().await.unwrap(), LoadOutcome::Applied);
    {
        let app = app.lock().unwrap();
        let message = app.dashboard.error().unwrap();
        assert!(message.contains("500"), "{message}");
        assert!(app.dashboard.loaded().is_none());
    }

    faults.fail_security.store(false, Ordering::SeqCst);
    let retry = loader.retry().unwrap();
    assert!(app.lock().unwrap().dashboard.is_loading());
    assert_eq!(retry.await.unwrap(), LoadOutcome::Applied);

    let app = app.lock().unwrap();
    let loaded = app.dashboard.loaded().unwrap();
    assert_eq!(loaded.generation, 2);
    assert_eq!(loaded.view.summary.len(), 8);
    assert!(app.in_flight.is_none());
}

#[tokio::test]
async fn test_retry_ignored_after_success() {
    let (client, _) = start_server().await;
    let (loader, app) = new_loader(client);

    assert_eq!(loader.load().await.unwrap(), LoadOutcome::Applied);
    assert!(loader.retry().is_none());
    assert_eq!(app.lock().unwrap().dashboard.generation(), 1);
}

#[tokio::test]
async fn test_new_load_supersedes_batch_in_flight() {
    let (client, faults) = start_server().await;
    faults.delay_ms.store(200, Ordering::SeqCst);
    let (loader, app) = new_loader(client);

    let first = loader.load();
    let second = loader.load();

    assert_eq!(first.await.unwrap(), LoadOutcome::Cancelled);
    assert_eq!(second.await.unwrap(), LoadOutcome::Applied);
    assert_eq!(app.lock().unwrap().dashboard.loaded().unwrap().generation, 2);
}

#[tokio::test]
async fn test_notify_fires_when_batch_settles() {
    let (client, _) = start_server().await;
    let (loader, _app) = new_loader(client);
    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    let loader = loader.with_notify(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    loader.load().await.unwrap();
    assert_eq!(notified.load(Ordering::SeqCst), 1);
}
