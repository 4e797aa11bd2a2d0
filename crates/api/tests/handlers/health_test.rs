use serde_json::{json, Value};

use crate::test_utils::TestContext;

#[tokio::test]
async fn health_reports_ok() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn readiness_checks_the_slot_store() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health/ready").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ready" }));
}

#[tokio::test]
async fn version_matches_the_package() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/version").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["version"], json!(env!("CARGO_PKG_VERSION")));
}
