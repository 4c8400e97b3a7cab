use crate::e2e::helpers;

use helpers::{at, monday, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_file_a_cancellation_and_log_it(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("Sana", "Shaikh");

    let response = ctx
        .client
        .post_with_auth(
            "/api/cancellations",
            &json!({
                "startDate": "2024-06-10",
                "endDate": "2024-06-12",
                "mealType": "lunch"
            }),
            &user.token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.body()["userId"], json!(user.id()));
    assert_eq!(response.body()["mealType"], "lunch");

    let response = ctx
        .client
        .get_with_auth("/api/activities", &user.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body()[0]["description"],
        "Cancelled lunch from 2024-06-10 to 2024-06-12"
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_same_day_cancellation_after_cutoff(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("Sana", "Shaikh");
    let body = json!({
        "startDate": "2024-06-10",
        "endDate": "2024-06-10",
        "mealType": "lunch"
    });

    ctx.clock.set(at(monday(), 11, 1));
    let response = ctx
        .client
        .post_with_auth("/api/cancellations", &body, &user.token)
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("cutoff passed for lunch (11:00)");

    ctx.clock.set(at(monday(), 10, 59));
    ctx.client
        .post_with_auth("/api/cancellations", &body, &user.token)
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_every_closed_window_for_both(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("Sana", "Shaikh");
    ctx.clock.set(at(monday(), 18, 0));

    let response = ctx
        .client
        .post_with_auth(
            "/api/cancellations",
            &json!({
                "startDate": "2024-06-10",
                "endDate": "2024-06-11",
                "mealType": "both"
            }),
            &user.token,
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("lunch (11:00) and dinner (16:30)");

    // Tomorrow is always open
    ctx.client
        .post_with_auth(
            "/api/cancellations",
            &json!({
                "startDate": "2024-06-11",
                "endDate": "2024-06-11",
                "mealType": "both"
            }),
            &user.token,
        )
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_duplicates_past_dates_and_bad_ranges(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("Sana", "Shaikh");
    let body = json!({
        "startDate": "2024-06-11",
        "endDate": "2024-06-14",
        "mealType": "dinner"
    });

    ctx.client
        .post_with_auth("/api/cancellations", &body, &user.token)
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);
    ctx.client
        .post_with_auth("/api/cancellations", &body, &user.token)
        .await
        .unwrap()
        .assert_status(StatusCode::CONFLICT);

    ctx.client
        .post_with_auth(
            "/api/cancellations",
            &json!({"startDate": "2024-06-09", "endDate": "2024-06-11", "mealType": "dinner"}),
            &user.token,
        )
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("past");

    ctx.client
        .post_with_auth(
            "/api/cancellations",
            &json!({"startDate": "2024-06-14", "endDate": "2024-06-12", "mealType": "dinner"}),
            &user.token,
        )
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("before start date");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_let_users_cancel_for_others(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("Sana", "Shaikh");
    let other = ctx.fixtures.create_user("Vikram", "Iyer");
    let admin = ctx.fixtures.create_admin("Farah");
    let body = json!({
        "userId": other.id(),
        "startDate": "2024-06-11",
        "endDate": "2024-06-11",
        "mealType": "lunch"
    });

    ctx.client
        .post_with_auth("/api/cancellations", &body, &user.token)
        .await
        .unwrap()
        .assert_status(StatusCode::FORBIDDEN);

    let response = ctx
        .client
        .post_with_auth("/api/cancellations", &body, &admin.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.body()["userId"], json!(other.id()));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_cancellations_with_names_for_admins(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("Sana", "Shaikh");
    let admin = ctx.fixtures.create_admin("Farah");

    for (start, end) in [("2024-06-11", "2024-06-12"), ("2024-06-20", "2024-06-20")] {
        ctx.client
            .post_with_auth(
                "/api/cancellations",
                &json!({"startDate": start, "endDate": end, "mealType": "both"}),
                &user.token,
            )
            .await
            .unwrap()
            .assert_status(StatusCode::CREATED);
    }

    let response = ctx
        .client
        .get_with_auth("/api/cancellations?date=2024-06-12", &admin.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    let listings = response.body().as_array().unwrap().clone();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["name"], "Sana Shaikh");
    assert_eq!(listings[0]["startDate"], "2024-06-11");

    let response = ctx
        .client
        .get_with_auth("/api/cancellations", &admin.token)
        .await
        .unwrap();
    assert_eq!(response.body().as_array().unwrap().len(), 2);

    ctx.client
        .get_with_auth("/api/cancellations", &user.token)
        .await
        .unwrap()
        .assert_status(StatusCode::FORBIDDEN);
}
