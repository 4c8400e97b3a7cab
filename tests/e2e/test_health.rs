use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_not_ready_without_database(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body = response.body();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("not_ready"));
    assert_eq!(
        body.get("database").and_then(|v| v.as_str()),
        Some("disconnected")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    // Errors carry one too
    let response = ctx.client.get("/api/holidays").await.unwrap();
    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_a_forwarded_request_id(ctx: &TestContext) {
    let forwarded = "5f0c6a52-8d7e-4f1e-9d55-2a1c3b7e9f10";
    let response = ctx
        .client
        .get_with_headers("/health", &[("x-request-id", forwarded)])
        .await
        .unwrap();

    assert_eq!(response.header("x-request-id").map(String::as_str), Some(forwarded));

    let response = ctx
        .client
        .get_with_headers("/health", &[("x-request-id", "not-a-uuid")])
        .await
        .unwrap();
    assert_ne!(response.header("x-request-id").map(String::as_str), Some("not-a-uuid"));
}
