//! HTTP Integration Tests
//!
//! Runs `HttpSearchClient` and a full `SearchSession` against an in-process axum server
//! that implements the search service contract.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use course_search::api::client::{HttpSearchClient, SearchApi};
use course_search::api::error::ApiError;
use course_search::config::SearchConfig;
use course_search::query::types::{QueryParams, QueryState};
use course_search::render::view::ResultsView;
use course_search::session::service::SearchSession;
use serde_json::json;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Raw query strings received by the mock service, in arrival order.
type RequestLog = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn handle_search(
    State(log): State<RequestLog>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    log.lock().unwrap().push(params.clone());

    match params.get("query").map(String::as_str) {
        Some("wines") => Json(json!({
            "results": [{
                "id": "1",
                "subject": "HADM",
                "title": "Wine Tasting",
                "description": "...",
                "relevance_score": 0.92
            }]
        }))
        .into_response(),
        Some("boom") => (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response(),
        Some("garbled") => (StatusCode::OK, "{\"courses\": 3}").into_response(),
        _ => Json(json!({ "results": [] })).into_response(),
    }
}

async fn handle_subjects() -> Json<serde_json::Value> {
    Json(json!({ "subjects": ["CS", "HADM", "HIST"] }))
}

/// Starts the mock service on an ephemeral port and returns its base URL.
async fn spawn_service() -> (String, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/search", get(handle_search))
        .route("/api/subjects", get(handle_subjects))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api", addr), log)
}

fn client(base_url: &str) -> HttpSearchClient {
    HttpSearchClient::new(&SearchConfig::new(base_url)).unwrap()
}

// ============================================================
// CLIENT TESTS
// ============================================================

#[tokio::test]
async fn test_search_returns_ranked_courses() {
    let (base_url, log) = spawn_service().await;

    let courses = client(&base_url)
        .search(&QueryParams::new("wines", None, None))
        .await
        .unwrap();

    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].title, "Wine Tasting");

    // Optional params are not sent at all
    let requests = log.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].len(), 1);
    assert_eq!(requests[0]["query"], "wines");
}

#[tokio::test]
async fn test_search_sends_limit_and_subject_filter() {
    let (base_url, log) = spawn_service().await;

    client(&base_url)
        .search(&QueryParams::new(
            "food & wine",
            NonZeroU32::new(5),
            Some("HADM".to_string()),
        ))
        .await
        .unwrap();

    let requests = log.lock().unwrap().clone();
    assert_eq!(requests[0]["query"], "food & wine");
    assert_eq!(requests[0]["limit"], "5");
    assert_eq!(requests[0]["subject_filter"], "HADM");
}

#[tokio::test]
async fn test_non_2xx_is_http_error() {
    let (base_url, _log) = spawn_service().await;

    let err = client(&base_url)
        .search(&QueryParams::new("boom", None, None))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Http(500)));
    assert_eq!(err.to_string(), "request failed with status code 500");
}

#[tokio::test]
async fn test_schema_mismatch_is_decode_error() {
    let (base_url, _log) = spawn_service().await;

    let err = client(&base_url)
        .search(&QueryParams::new("garbled", None, None))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Bind and immediately drop a listener to get a port nobody serves
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr))
        .subjects()
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_subjects() {
    let (base_url, _log) = spawn_service().await;

    let subjects = client(&base_url).subjects().await.unwrap();

    assert_eq!(subjects, vec!["CS", "HADM", "HIST"]);
}

// ============================================================
// SESSION TESTS
// ============================================================

async fn wait_for<F>(session: &SearchSession, mut done: F)
where
    F: FnMut(&course_search::session::types::SearchView) -> bool,
{
    let mut updates = session.subscribe();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if done(&*updates.borrow_and_update()) {
                return;
            }
            updates.changed().await.unwrap();
        }
    })
    .await
    .expect("session did not reach the expected state");
}

#[tokio::test]
async fn test_session_end_to_end() {
    // ARRANGE
    let (base_url, log) = spawn_service().await;
    let config = SearchConfig::new(&base_url).with_debounce(Duration::from_millis(50));
    let session = SearchSession::spawn(Arc::new(client(&base_url)), &config);

    // ACT: type, let the debounce settle
    session.input("w").unwrap();
    session.input("wi").unwrap();
    session.input("wines").unwrap();
    wait_for(&session, |view| view.results.data().is_some()).await;

    // ASSERT
    let text = session.view().results_view().to_string();
    assert!(text.contains("HADM: Wine Tasting"));
    assert!(text.contains("Relevance: 92%"));
    assert_eq!(log.lock().unwrap().len(), 1);

    wait_for(&session, |view| matches!(view.subjects, QueryState::Success(_))).await;

    session.shutdown().await;
}

#[tokio::test]
async fn test_session_failure_then_recovery() {
    let (base_url, _log) = spawn_service().await;
    let session = SearchSession::spawn(Arc::new(client(&base_url)), &SearchConfig::new(&base_url));

    session.input("boom").unwrap();
    session.submit().unwrap();
    wait_for(&session, |view| view.results.error().is_some()).await;
    assert_eq!(
        session.view().results_view(),
        ResultsView::Failure {
            message: "request failed with status code 500".to_string()
        }
    );

    session.input("wines").unwrap();
    session.submit().unwrap();
    wait_for(&session, |view| view.results.data().is_some()).await;
    assert!(matches!(session.view().results_view(), ResultsView::Results(_)));

    session.shutdown().await;
}
