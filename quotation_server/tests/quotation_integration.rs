//! Integration tests for `GET /cotacao`.
//!
//! Tests the full handler chain against a mock upstream served on a local port:
//! - success path and bid consistency between response and store
//! - upstream timeout, transport failure and malformed bodies
//! - persistence failures and the independent database deadline

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::get,
};
use quotation_common::Deadline;
use quotation_common::model::{ErrorResponse, Quotation, QuotationResponse};
use quotation_server::{
    AppState, QuotationStore, ServerConfig, ServerError, SqliteStore, StoreError, UpstreamClient,
    create_router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;

// ============================================================================
// Test Fixtures
// ============================================================================

const UPSTREAM_PATH: &str = "/json/last/USD-BRL";

const UPSTREAM_BODY: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar/Real","high":"5.50","low":"5.40","varBid":"0.01","pctChange":"0.18","bid":"5.45","ask":"5.46","timestamp":"1700000000","create_date":"2023-11-14 10:00:00"}}"#;

/// Start a mock upstream that answers `body` after `delay`
async fn start_upstream(body: &'static str, delay: Duration) -> String {
    let app = Router::new().route(
        UPSTREAM_PATH,
        get(move || async move {
            tokio::time::sleep(delay).await;
            ([(header::CONTENT_TYPE, "application/json")], body)
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}{}", addr, UPSTREAM_PATH)
}

/// An address nothing listens on
async fn closed_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, UPSTREAM_PATH)
}

fn config(upstream_url: &str, request_timeout: Duration, database_timeout: Duration) -> ServerConfig {
    ServerConfig {
        request_timeout,
        database_timeout,
        upstream_url: upstream_url.to_string(),
        ..ServerConfig::default()
    }
}

async fn sqlite_store() -> SqliteStore {
    let store = SqliteStore::in_memory().await.unwrap();
    store.create_table().await.unwrap();
    store
}

fn state<S: QuotationStore>(config: ServerConfig, store: S) -> Arc<AppState<S>> {
    let upstream = UpstreamClient::new(config.upstream_url.clone()).unwrap();
    Arc::new(AppState::new(config, upstream, store))
}

/// Send `GET /cotacao` through the router and return status and body
async fn get_cotacao<S: QuotationStore + 'static>(
    state: Arc<AppState<S>>,
) -> (StatusCode, axum::body::Bytes) {
    let response = create_router(state)
        .oneshot(
            Request::builder()
                .uri("/cotacao")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body)
}

/// Store that waits before recording, counting completed inserts
struct SlowStore {
    delay: Duration,
    inserted: AtomicUsize,
}

impl SlowStore {
    fn new(delay: Duration) -> Self {
        SlowStore {
            delay,
            inserted: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl QuotationStore for SlowStore {
    async fn insert(&self, _quotation: &Quotation) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inserted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Store whose table was never created
struct BrokenStore(SqliteStore);

#[async_trait]
impl QuotationStore for BrokenStore {
    async fn insert(&self, quotation: &Quotation) -> Result<(), StoreError> {
        self.0.insert(quotation).await
    }
}

// ============================================================================
// Success Path
// ============================================================================

#[tokio::test]
async fn test_returns_bid_and_stores_full_quotation() {
    let upstream = start_upstream(UPSTREAM_BODY, Duration::ZERO).await;
    let store = sqlite_store().await;
    let state = state(
        config(&upstream, Duration::from_secs(2), Duration::from_secs(1)),
        store,
    );

    let (status, body) = get_cotacao(Arc::clone(&state)).await;

    assert_eq!(status, StatusCode::OK);
    let response: QuotationResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.bid, "5.45");
    assert_eq!(&body[..], br#"{"bid":"5.45"}"#);

    let rows = state.store.quotations().await.unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.code, "USD");
    assert_eq!(row.code_in, "BRL");
    assert_eq!(row.name, "Dólar/Real");
    assert_eq!(row.high, "5.50");
    assert_eq!(row.low, "5.40");
    assert_eq!(row.var_bid, "0.01");
    assert_eq!(row.pct_change, "0.18");
    assert_eq!(row.ask, "5.46");
    assert_eq!(row.timestamp, "1700000000");
    assert_eq!(row.create_date, "2023-11-14 10:00:00");
    assert_eq!(row.bid, response.bid);
}

#[tokio::test]
async fn test_each_request_appends_a_row() {
    let upstream = start_upstream(UPSTREAM_BODY, Duration::ZERO).await;
    let state = state(
        config(&upstream, Duration::from_secs(2), Duration::from_secs(1)),
        sqlite_store().await,
    );

    for _ in 0..3 {
        let (status, _) = get_cotacao(Arc::clone(&state)).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(state.store.quotations().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_success_sets_json_content_type() {
    let upstream = start_upstream(UPSTREAM_BODY, Duration::ZERO).await;
    let state = state(
        config(&upstream, Duration::from_secs(2), Duration::from_secs(1)),
        sqlite_store().await,
    );

    let response = create_router(state)
        .oneshot(Request::builder().uri("/cotacao").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
}

// ============================================================================
// Upstream Failures
// ============================================================================

#[tokio::test]
async fn test_upstream_timeout_reports_budget_and_skips_persistence() {
    let upstream = start_upstream(UPSTREAM_BODY, Duration::from_secs(2)).await;
    let state = state(
        config(&upstream, Duration::from_millis(200), Duration::from_secs(1)),
        sqlite_store().await,
    );

    let (status, body) = get_cotacao(Arc::clone(&state)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "request exceeded maximum time of 200ms");
    assert_eq!(error.status_code, 500);
    assert!(state.store.quotations().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_upstream_is_a_transport_error() {
    let upstream = closed_upstream().await;
    let state = state(
        config(&upstream, Duration::from_secs(2), Duration::from_secs(1)),
        sqlite_store().await,
    );

    let (status, body) = get_cotacao(Arc::clone(&state)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error.starts_with("GET /cotacao - request failed:"));
    assert_eq!(error.status_code, 500);
    assert!(state.store.quotations().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_upstream_body_is_a_decode_error() {
    let upstream = start_upstream(r#"{"status":404,"message":"not found"}"#, Duration::ZERO).await;
    let state = state(
        config(&upstream, Duration::from_secs(2), Duration::from_secs(1)),
        sqlite_store().await,
    );

    let (status, body) = get_cotacao(Arc::clone(&state)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(
        error
            .error
            .starts_with("GET /cotacao - failed to decode response body:")
    );
    assert!(state.store.quotations().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_stricter_parent_deadline_bounds_upstream_call() {
    let upstream = start_upstream(UPSTREAM_BODY, Duration::from_millis(500)).await;
    let store = SlowStore::new(Duration::ZERO);
    let state = state(
        config(&upstream, Duration::from_secs(5), Duration::from_secs(1)),
        store,
    );

    let parent = Deadline::after(Duration::from_millis(50));
    let err = state.quote(Some(parent)).await.unwrap_err();

    assert!(matches!(err, ServerError::UpstreamTimeout(_)));
    assert_eq!(state.store.inserted.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Persistence Failures
// ============================================================================

#[tokio::test]
async fn test_database_timeout_is_reported_as_persistence_failure() {
    let upstream = start_upstream(UPSTREAM_BODY, Duration::ZERO).await;
    let state = state(
        config(&upstream, Duration::from_secs(2), Duration::from_millis(10)),
        SlowStore::new(Duration::from_millis(500)),
    );

    let (status, body) = get_cotacao(Arc::clone(&state)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        error.error,
        "GET /cotacao - failed to save data in the database: query exceeded maximum time of 10ms"
    );
    assert_eq!(error.status_code, 500);
    assert_eq!(state.store.inserted.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_statement_failure_is_reported_as_persistence_failure() {
    let store = BrokenStore(SqliteStore::in_memory().await.unwrap());
    let upstream = start_upstream(UPSTREAM_BODY, Duration::ZERO).await;
    let state = state(
        config(&upstream, Duration::from_secs(2), Duration::from_secs(1)),
        store,
    );

    let (status, body) = get_cotacao(state).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(
        error
            .error
            .starts_with("GET /cotacao - failed to save data in the database: failed to execute query.")
    );
}

#[tokio::test]
async fn test_database_deadline_is_independent_of_upstream_deadline() {
    // Upstream takes most of its 400ms budget; the insert still gets its own
    // full second because it is derived from the inbound scope.
    let upstream = start_upstream(UPSTREAM_BODY, Duration::from_millis(250)).await;
    let state = state(
        config(&upstream, Duration::from_millis(400), Duration::from_secs(1)),
        SlowStore::new(Duration::from_millis(300)),
    );

    let response = state.quote(None).await.unwrap();

    assert_eq!(response.bid, "5.45");
    assert_eq!(state.store.inserted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let upstream = start_upstream(UPSTREAM_BODY, Duration::ZERO).await;
    let state = state(
        config(&upstream, Duration::from_secs(2), Duration::from_secs(1)),
        sqlite_store().await,
    );

    let response = create_router(state)
        .oneshot(Request::builder().uri("/quote").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
