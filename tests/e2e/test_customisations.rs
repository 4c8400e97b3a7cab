use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_store_and_list_customisations(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("Neha", "Joshi");
    let admin = ctx.fixtures.create_admin("Farah");

    let response = ctx
        .client
        .put_with_auth(
            "/api/customisations",
            &json!({
                "date": "2024-06-11",
                "items": [
                    {"name": "brown rice", "weight": "120g"},
                    {"name": "peanuts", "weight": "0g", "exclude": true}
                ]
            }),
            &user.token,
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.body()["items"][1]["exclude"], true);

    let response = ctx
        .client
        .get_with_auth("/api/customisations?date=2024-06-11", &admin.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    let listings = response.body().as_array().unwrap().clone();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["user"]["name"], "Neha Joshi");
    assert_eq!(listings[0]["user"]["email"], "neha.joshi@example.com");
    assert_eq!(listings[0]["items"][0]["name"], "brown rice");

    let response = ctx
        .client
        .get_with_auth("/api/activities", &user.token)
        .await
        .unwrap();
    assert_eq!(
        response.body()[0]["description"],
        "Requested meal customisation for 2024-06-11"
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_or_past_customisations(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("Neha", "Joshi");

    ctx.client
        .put_with_auth(
            "/api/customisations",
            &json!({"date": "2024-06-11", "items": []}),
            &user.token,
        )
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("At least one item");

    ctx.client
        .put_with_auth(
            "/api/customisations",
            &json!({"date": "2024-06-01", "items": [{"name": "dal", "weight": "200g"}]}),
            &user.token,
        )
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.client
        .get_with_auth("/api/customisations?date=2024-06-11", &user.token)
        .await
        .unwrap()
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_activity_trails_private(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("Neha", "Joshi");
    let other = ctx.fixtures.create_user("Arjun", "Menon");

    let response = ctx
        .client
        .get_with_auth(&format!("/api/activities?userId={}", user.id()), &other.token)
        .await
        .unwrap();

    response.assert_status(StatusCode::FORBIDDEN);
}
