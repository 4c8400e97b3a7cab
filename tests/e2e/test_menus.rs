use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_context::test_context;
use uuid::Uuid;

fn menu(meal_type: &str, dishes: &[&str]) -> Value {
    json!({
        "date": "2024-06-11",
        "mealType": meal_type,
        "items": dishes
            .iter()
            .map(|name| json!({"name": name, "weight": "250g", "type": "veg"}))
            .collect::<Vec<_>>()
    })
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_publish_and_replace_a_menu(ctx: &TestContext) {
    let admin = ctx.fixtures.create_admin("Farah");
    let user = ctx.fixtures.create_user("Meera", "Nair");

    let response = ctx
        .client
        .put_with_auth("/api/menus", &menu("lunch", &["Dal Tadka", "Jeera Rice"]), &admin.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::CREATED);
    let menu_id = response.body()["id"].clone();
    assert_eq!(response.body()["items"].as_array().unwrap().len(), 2);
    assert_eq!(response.body()["updatedBy"], json!(admin.id()));

    let response = ctx
        .client
        .put_with_auth("/api/menus", &menu("lunch", &["Rajma Chawal"]), &admin.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body()["id"], menu_id);
    assert_eq!(response.body()["items"][0]["name"], "Rajma Chawal");
    assert_eq!(response.body()["items"][0]["type"], "veg");

    ctx.client
        .put_with_auth("/api/menus", &menu("dinner", &["Paneer Tikka"]), &admin.token)
        .await
        .unwrap()
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .client
        .get_with_auth("/api/menus?date=2024-06-11", &user.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    let menus = response.body().as_array().unwrap().clone();
    assert_eq!(menus.len(), 2);
    assert_eq!(menus[0]["mealType"], "lunch");
    assert_eq!(menus[1]["mealType"], "dinner");

    let response = ctx
        .client
        .get_with_auth("/api/menus?date=2024-06-11&mealType=dinner", &user.token)
        .await
        .unwrap();
    assert_eq!(response.body().as_array().unwrap().len(), 1);
    assert_eq!(response.body()[0]["items"][0]["name"], "Paneer Tikka");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_menus_admin_only(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("Meera", "Nair");
    let admin = ctx.fixtures.create_admin("Farah");

    ctx.client
        .put_with_auth("/api/menus", &menu("lunch", &["Dal Tadka"]), &user.token)
        .await
        .unwrap()
        .assert_status(StatusCode::FORBIDDEN);

    ctx.client
        .put_with_auth("/api/menus", &menu("lunch", &[]), &admin.token)
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("At least one item is required");

    let mut blank_weight = menu("lunch", &["Dal Tadka"]);
    blank_weight["items"][0]["weight"] = json!("  ");
    ctx.client
        .put_with_auth("/api/menus", &blank_weight, &admin.token)
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.client
        .get("/api/menus?date=2024-06-11")
        .await
        .unwrap()
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_remove_items_and_drop_empty_menus(ctx: &TestContext) {
    let admin = ctx.fixtures.create_admin("Farah");
    let user = ctx.fixtures.create_user("Meera", "Nair");

    let response = ctx
        .client
        .put_with_auth("/api/menus", &menu("dinner", &["Palak Paneer", "Roti"]), &admin.token)
        .await
        .unwrap();
    let menu_id = response.body()["id"].as_str().unwrap().to_string();
    let first = response.body()["items"][0]["id"].as_str().unwrap().to_string();
    let second = response.body()["items"][1]["id"].as_str().unwrap().to_string();

    ctx.client
        .delete_with_auth(&format!("/api/menus/{}/items/{}", menu_id, first), &user.token)
        .await
        .unwrap()
        .assert_status(StatusCode::FORBIDDEN);

    ctx.client
        .delete_with_auth(
            &format!("/api/menus/{}/items/{}", menu_id, Uuid::new_v4()),
            &admin.token,
        )
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);

    let response = ctx
        .client
        .delete_with_auth(&format!("/api/menus/{}/items/{}", menu_id, first), &admin.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body()["message"], "Item removed successfully");
    assert_eq!(response.body()["menuDeleted"], false);

    let response = ctx
        .client
        .delete_with_auth(&format!("/api/menus/{}/items/{}", menu_id, second), &admin.token)
        .await
        .unwrap();
    assert_eq!(response.body()["menuDeleted"], true);

    let response = ctx
        .client
        .get_with_auth("/api/menus?date=2024-06-11&mealType=dinner", &user.token)
        .await
        .unwrap();
    assert_eq!(response.body().as_array().unwrap().len(), 0);

    ctx.client
        .delete_with_auth(&format!("/api/menus/{}/items/{}", menu_id, second), &admin.token)
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);
}
