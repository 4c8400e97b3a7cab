use crate::e2e::helpers;

use chrono::Duration;
use helpers::postgres::PostgresTestContext;
use helpers::{monday, payment_confirmation};
use hyper::StatusCode;
use mealprep_backend::domain::ledger::{DebitOutcome, LedgerRepository, TransferOutcome};
use mealprep_backend::domain::shared::MealType;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;
use uuid::Uuid;

#[test_context(PostgresTestContext)]
#[tokio::test]
async fn it_should_store_purchases_and_report_standing(ctx: &PostgresTestContext) {
    let admin = ctx.fixtures.create_admin("Farah").await;
    let user = ctx.fixtures.create_user("Anil", "Kumar").await;

    ctx.client
        .post_with_auth(
            "/api/subscriptions",
            &payment_confirmation(user.id(), "Weekly Plan", None),
            &admin.token,
        )
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .client
        .get_with_auth(&format!("/api/subscriptions/{}", user.id()), &user.token)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body();
    assert_eq!(body["isSubscribed"], true);
    assert_eq!(body["subscription"]["plan"], "Weekly Plan");
    assert_eq!(body["subscription"]["subscriptionStartDate"], "2024-06-10");
    assert_eq!(body["subscription"]["lunchMeals"], 7);
    assert_eq!(body["subscription"]["mealType"], "veg");
    assert_eq!(body["latestPurchase"]["orderId"], "order_E2E0001");
    assert_eq!(body["latestPurchase"]["mealSplit"], "even");
}

#[test_context(PostgresTestContext)]
#[tokio::test]
async fn it_should_keep_the_start_date_while_credits_remain(ctx: &PostgresTestContext) {
    let admin = ctx.fixtures.create_admin("Farah").await;
    let user = ctx.fixtures.create_user("Anil", "Kumar").await;
    let next_monday = monday() + Duration::days(7);

    ctx.client
        .post_with_auth(
            "/api/subscriptions",
            &payment_confirmation(user.id(), "Trial Meal Pack", None),
            &admin.token,
        )
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);

    let mut top_up = payment_confirmation(user.id(), "Weekly Plan", None);
    top_up["startDate"] = json!(next_monday);
    top_up["carbType"] = json!(null);
    ctx.client
        .post_with_auth("/api/subscriptions", &top_up, &admin.token)
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);

    let balance = ctx.fixtures.balance(user.id()).await.unwrap();
    assert_eq!(balance.subscription_start_date, monday());
    assert_eq!(balance.plan.as_str(), "Weekly Plan");
    assert_eq!((balance.lunch_meals, balance.dinner_meals), (10, 10));
    // Tags are only replaced when the purchase carries them
    assert_eq!(balance.carb_type.as_deref(), Some("regular"));
}

#[test_context(PostgresTestContext)]
#[tokio::test]
async fn it_should_restart_an_exhausted_subscription(ctx: &PostgresTestContext) {
    let admin = ctx.fixtures.create_admin("Farah").await;
    let user = ctx.fixtures.create_user("Anil", "Kumar").await;
    let next_monday = monday() + Duration::days(7);
    let ledger = ctx.fixtures.ledger();

    ctx.client
        .post_with_auth(
            "/api/subscriptions",
            &payment_confirmation(user.id(), "Trial Meal Pack", None),
            &admin.token,
        )
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);
    assert!(ledger.decrement(user.id(), MealType::Lunch, 3).await.unwrap());
    assert!(ledger.decrement(user.id(), MealType::Dinner, 3).await.unwrap());

    let mut renewal = payment_confirmation(user.id(), "Trial Meal Pack", None);
    renewal["startDate"] = json!(next_monday);
    ctx.client
        .post_with_auth("/api/subscriptions", &renewal, &admin.token)
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);

    let balance = ctx.fixtures.balance(user.id()).await.unwrap();
    assert_eq!(balance.subscription_start_date, next_monday);
    assert_eq!((balance.lunch_meals, balance.dinner_meals), (3, 3));
}

#[test_context(PostgresTestContext)]
#[tokio::test]
async fn it_should_debit_each_meal_at_most_once_per_day(ctx: &PostgresTestContext) {
    let admin = ctx.fixtures.create_admin("Farah").await;
    let user = ctx.fixtures.create_user("Anil", "Kumar").await;
    let ledger = ctx.fixtures.ledger();

    ctx.client
        .post_with_auth(
            "/api/subscriptions",
            &payment_confirmation(user.id(), "Trial Meal Pack", None),
            &admin.token,
        )
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);

    assert_eq!(
        ledger.debit_once(user.id(), MealType::Lunch, monday()).await.unwrap(),
        DebitOutcome::Debited { remaining: 2 }
    );
    assert_eq!(
        ledger.debit_once(user.id(), MealType::Lunch, monday()).await.unwrap(),
        DebitOutcome::AlreadyDebited
    );
    assert_eq!(
        ledger
            .debit_once(user.id(), MealType::Lunch, monday() + Duration::days(1))
            .await
            .unwrap(),
        DebitOutcome::Debited { remaining: 1 }
    );

    // Racing debits for the same day take a single credit
    let (first, second) = tokio::join!(
        ledger.debit_once(user.id(), MealType::Dinner, monday()),
        ledger.debit_once(user.id(), MealType::Dinner, monday()),
    );
    let mut outcomes = vec![first.unwrap(), second.unwrap()];
    outcomes.sort_by_key(|o| matches!(o, DebitOutcome::AlreadyDebited));
    assert_eq!(
        outcomes,
        vec![DebitOutcome::Debited { remaining: 2 }, DebitOutcome::AlreadyDebited]
    );

    assert_eq!(
        ledger.debit_once(Uuid::new_v4(), MealType::Lunch, monday()).await.unwrap(),
        DebitOutcome::NoBalance
    );
    assert!(!ledger.decrement(user.id(), MealType::Lunch, 5).await.unwrap());
    assert_eq!(
        ledger.transfer_next_day(user.id(), monday()).await.unwrap(),
        TransferOutcome::NothingPending
    );

    let balance = ctx.fixtures.balance(user.id()).await.unwrap();
    assert_eq!((balance.lunch_meals, balance.dinner_meals), (1, 2));
}
