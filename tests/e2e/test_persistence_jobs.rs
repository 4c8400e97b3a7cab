use crate::e2e::helpers;

use helpers::postgres::PostgresTestContext;
use helpers::{at, monday, payment_confirmation};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(PostgresTestContext)]
#[tokio::test]
async fn it_should_debit_once_and_honour_cancellations_in_postgres(ctx: &PostgresTestContext) {
    let admin = ctx.fixtures.create_admin("Farah").await;
    let eating = ctx.fixtures.create_user("Rohan", "Verma").await;
    let away = ctx.fixtures.create_user("Isha", "Gupta").await;
    let skips_lunch = ctx.fixtures.create_user("Kabir", "Das").await;

    for user in [eating.id(), away.id(), skips_lunch.id()] {
        ctx.client
            .post_with_auth(
                "/api/subscriptions",
                &payment_confirmation(user, "Trial Meal Pack", None),
                &admin.token,
            )
            .await
            .unwrap()
            .assert_status(StatusCode::CREATED);
    }
    for (user, meal_type) in [(&away, "both"), (&skips_lunch, "lunch")] {
        ctx.client
            .post_with_auth(
                "/api/cancellations",
                &json!({"startDate": "2024-06-10", "endDate": "2024-06-10", "mealType": meal_type}),
                &user.token,
            )
            .await
            .unwrap()
            .assert_status(StatusCode::CREATED);
    }

    ctx.clock.set(at(monday(), 11, 15));
    let response = ctx
        .client
        .post_with_auth("/api/admin/jobs/debit-lunch", &json!({}), &admin.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body()["debited"], 1);
    assert_eq!(response.body()["excludedByCancellation"], 2);

    let retry = ctx
        .client
        .post_with_auth("/api/admin/jobs/debit-lunch", &json!({}), &admin.token)
        .await
        .unwrap();
    assert_eq!(retry.body()["debited"], 0);
    assert_eq!(retry.body()["alreadyDebited"], 1);

    // A lunch-only cancellation leaves dinner billable
    ctx.clock.set(at(monday(), 16, 45));
    let response = ctx
        .client
        .post_with_auth("/api/admin/jobs/debit-dinner", &json!({}), &admin.token)
        .await
        .unwrap();
    assert_eq!(response.body()["debited"], 2);
    assert_eq!(response.body()["excludedByCancellation"], 1);

    let balance = ctx.fixtures.balance(eating.id()).await.unwrap();
    assert_eq!((balance.lunch_meals, balance.dinner_meals), (2, 2));
    assert_eq!(balance.last_lunch_debit_on, Some(monday()));
    assert_eq!(balance.last_dinner_debit_on, Some(monday()));

    let balance = ctx.fixtures.balance(away.id()).await.unwrap();
    assert_eq!((balance.lunch_meals, balance.dinner_meals), (3, 3));

    let balance = ctx.fixtures.balance(skips_lunch.id()).await.unwrap();
    assert_eq!((balance.lunch_meals, balance.dinner_meals), (3, 2));
}

#[test_context(PostgresTestContext)]
#[tokio::test]
async fn it_should_skip_debits_on_stored_holidays(ctx: &PostgresTestContext) {
    let admin = ctx.fixtures.create_admin("Farah").await;
    let user = ctx.fixtures.create_user("Rohan", "Verma").await;
    ctx.client
        .post_with_auth(
            "/api/subscriptions",
            &payment_confirmation(user.id(), "Trial Meal Pack", None),
            &admin.token,
        )
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);
    ctx.fixtures.add_holiday(monday(), "Founders Day").await;

    let response = ctx
        .client
        .post_with_auth("/api/admin/jobs/debit-lunch", &json!({}), &admin.token)
        .await
        .unwrap();

    assert_eq!(response.body()["holiday"], true);
    assert_eq!(response.body()["debited"], 0);
    assert_eq!(ctx.fixtures.balance(user.id()).await.unwrap().lunch_meals, 3);
}

#[test_context(PostgresTestContext)]
#[tokio::test]
async fn it_should_hold_next_day_credits_until_the_start_date(ctx: &PostgresTestContext) {
    let admin = ctx.fixtures.create_admin("Farah").await;
    let user = ctx.fixtures.create_user("Rohan", "Verma").await;
    let wednesday = monday() + chrono::Duration::days(2);

    // Bought after both cutoffs, starting Wednesday
    ctx.clock.set(at(monday(), 20, 0));
    let mut purchase = payment_confirmation(user.id(), "Weekly Plan", None);
    purchase["startDate"] = json!(wednesday);
    ctx.client
        .post_with_auth("/api/subscriptions", &purchase, &admin.token)
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);

    ctx.clock.set(at(monday() + chrono::Duration::days(1), 5, 0));
    let response = ctx
        .client
        .post_with_auth("/api/admin/jobs/transfer-next-day", &json!({}), &admin.token)
        .await
        .unwrap();
    assert_eq!(response.body()["transferred"], 0);
    assert_eq!(response.body()["notStarted"], 1);
    let balance = ctx.fixtures.balance(user.id()).await.unwrap();
    assert_eq!((balance.lunch_meals, balance.next_day_lunch_meals), (0, 7));

    ctx.clock.set(at(wednesday, 5, 0));
    let response = ctx
        .client
        .post_with_auth("/api/admin/jobs/transfer-next-day", &json!({}), &admin.token)
        .await
        .unwrap();
    assert_eq!(response.body()["transferred"], 1);
    assert_eq!(response.body()["lunchCredits"], 7);
    assert_eq!(response.body()["dinnerCredits"], 7);

    let balance = ctx.fixtures.balance(user.id()).await.unwrap();
    assert_eq!((balance.lunch_meals, balance.dinner_meals), (7, 7));
    assert_eq!((balance.next_day_lunch_meals, balance.next_day_dinner_meals), (0, 0));

    // Nothing is left to move on a second run
    let response = ctx
        .client
        .post_with_auth("/api/admin/jobs/transfer-next-day", &json!({}), &admin.token)
        .await
        .unwrap();
    assert_eq!(response.body()["transferred"], 0);
    assert_eq!(ctx.fixtures.balance(user.id()).await.unwrap().lunch_meals, 7);
}
