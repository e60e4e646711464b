mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use currency_converter::api::middleware::throttle::ThrottleSettings;
use currency_converter::api::routes::app_router;

use common::{StubProvider, create_test_state};

fn tight_throttle(permit_limit: u32, window: Duration) -> ThrottleSettings {
    ThrottleSettings {
        permit_limit,
        window,
    }
}

// Without connection info every test request shares the "anonymous"
// identity, so the limit applies to the server as a whole here.
#[tokio::test]
async fn test_requests_over_limit_are_rejected() {
    let state = create_test_state(
        StubProvider::new(),
        tight_throttle(2, Duration::from_secs(60)),
    );
    let server = TestServer::new(app_router(state)).unwrap();

    server.get("/api/rates/latest").await.assert_status_ok();
    server.get("/api/rates/latest").await.assert_status_ok();

    let response = server.get("/api/rates/latest").await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "too_many_requests");
}

#[tokio::test]
async fn test_limit_spans_all_throttled_endpoints() {
    let state = create_test_state(
        StubProvider::new(),
        tight_throttle(1, Duration::from_secs(60)),
    );
    let server = TestServer::new(app_router(state)).unwrap();

    server.get("/api/rates/latest").await.assert_status_ok();

    // A different endpoint draws from the same counter.
    server
        .get("/api/rates/2024-01-10")
        .add_query_param("base", "EUR")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_health_endpoint_is_not_throttled() {
    let state = create_test_state(
        StubProvider::new(),
        tight_throttle(1, Duration::from_secs(60)),
    );
    let server = TestServer::new(app_router(state)).unwrap();

    server.get("/api/rates/latest").await.assert_status_ok();
    server
        .get("/api/rates/latest")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    server.get("/api/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_readmitted_after_window_expires() {
    let state = create_test_state(
        StubProvider::new(),
        tight_throttle(1, Duration::from_millis(100)),
    );
    let server = TestServer::new(app_router(state)).unwrap();

    server.get("/api/rates/latest").await.assert_status_ok();
    server
        .get("/api/rates/latest")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    tokio::time::sleep(Duration::from_millis(150)).await;

    server.get("/api/rates/latest").await.assert_status_ok();
}
