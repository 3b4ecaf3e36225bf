//! End to end checks against a running server with a migrated database.
//!
//! Start the app, then run `cargo test -- --ignored` with `APP_URL` pointing at it.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;

#[derive(Deserialize)]
struct Tokens {
    access_token: String,
    refresh_token: String,
}

fn base_url() -> String {
    env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, ulid::Ulid::new().to_string().to_lowercase())
}

async fn sign_up(client: &Client, role: &str) -> Tokens {
    let response = client
        .post(format!("{}/api/auth/sign-up", base_url()))
        .json(&json!({
            "email": unique_email(&role.to_lowercase()),
            "password": "correct-horse-battery",
            "first_name": "Test",
            "last_name": role,
            "role": role,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json::<Tokens>().await.unwrap()
}

#[tokio::test]
#[ignore]
async fn sign_up_then_sign_in_and_refresh() {
    let client = Client::new();
    let email = unique_email("customer");

    let response = client
        .post(format!("{}/api/auth/sign-up", base_url()))
        .json(&json!({
            "email": email,
            "password": "correct-horse-battery",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "CUSTOMER",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let duplicate = client
        .post(format!("{}/api/auth/sign-up", base_url()))
        .json(&json!({
            "email": email,
            "password": "correct-horse-battery",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "CUSTOMER",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let wrong_password = client
        .post(format!("{}/api/auth/sign-in", base_url()))
        .json(&json!({ "email": email, "password": "wrong-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let tokens = client
        .post(format!("{}/api/auth/sign-in", base_url()))
        .json(&json!({ "email": email, "password": "correct-horse-battery" }))
        .send()
        .await
        .unwrap()
        .json::<Tokens>()
        .await
        .unwrap();

    let refreshed = client
        .post(format!("{}/api/auth/refresh", base_url()))
        .json(&json!({ "refresh_token": tokens.refresh_token }))
        .send()
        .await
        .unwrap();
    assert_eq!(refreshed.status(), StatusCode::OK);

    let profile = client
        .get(format!("{}/api/users/me", base_url()))
        .bearer_auth(&tokens.access_token)
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(profile["email"], json!(email));
    assert_eq!(profile["role"], json!("CUSTOMER"));
}

#[tokio::test]
#[ignore]
async fn owners_build_a_menu_and_customers_order_from_it() {
    let client = Client::new();
    let owner = sign_up(&client, "RESTAURANT_OWNER").await;
    let customer = sign_up(&client, "CUSTOMER").await;

    let restaurant = client
        .post(format!("{}/api/restaurants", base_url()))
        .bearer_auth(&owner.access_token)
        .json(&json!({
            "name": "Test Kitchen",
            "description": "Integration test restaurant",
            "address": "1 Test Street",
            "phone_number": "+15551234567",
            "opening_time": "08:00",
            "closing_time": "22:00",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(restaurant.status(), StatusCode::CREATED);
    let restaurant = restaurant.json::<Value>().await.unwrap();
    let restaurant_id = restaurant["id"].as_str().unwrap().to_string();

    let location = client
        .put(format!("{}/api/restaurants/{}/location", base_url(), restaurant_id))
        .bearer_auth(&owner.access_token)
        .json(&json!({ "latitude": 6.5244, "longitude": 3.3792 }))
        .send()
        .await
        .unwrap();
    assert_eq!(location.status(), StatusCode::OK);

    let foreign_update = client
        .put(format!("{}/api/restaurants/{}", base_url(), restaurant_id))
        .bearer_auth(&customer.access_token)
        .json(&json!({ "name": "Hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(foreign_update.status(), StatusCode::FORBIDDEN);

    let category = client
        .post(format!("{}/api/categories", base_url()))
        .bearer_auth(&owner.access_token)
        .json(&json!({ "name": "Mains", "restaurant_id": restaurant_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(category.status(), StatusCode::CREATED);

    let nearby = client
        .get(format!(
            "{}/api/restaurants/nearby?latitude=6.5244&longitude=3.3792&radius_km=5",
            base_url()
        ))
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert!(nearby["items"]
        .as_array()
        .unwrap()
        .iter()
        .any(|item| item["id"] == json!(restaurant_id)));

    let empty_order = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&customer.access_token)
        .json(&json!({
            "restaurant_id": restaurant_id,
            "items": [],
            "delivery_address": "2 Test Street",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(empty_order.status(), StatusCode::BAD_REQUEST);

    let owner_order = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&owner.access_token)
        .json(&json!({
            "restaurant_id": restaurant_id,
            "items": [{ "menu_item_id": "missing", "quantity": 1 }],
            "delivery_address": "2 Test Street",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(owner_order.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore]
async fn drivers_register_once_and_share_their_location() {
    let client = Client::new();
    let driver = sign_up(&client, "DRIVER").await;

    let unregistered = client
        .get(format!("{}/api/drivers/me", base_url()))
        .bearer_auth(&driver.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(unregistered.status(), StatusCode::NOT_FOUND);

    let register = || {
        client
            .post(format!("{}/api/drivers", base_url()))
            .bearer_auth(&driver.access_token)
            .json(&json!({ "vehicle_type": "Bicycle", "license_plate": "TEST-123" }))
            .send()
    };
    assert_eq!(register().await.unwrap().status(), StatusCode::CREATED);
    assert_eq!(register().await.unwrap().status(), StatusCode::CONFLICT);

    let ping = client
        .post(format!("{}/api/drivers/me/location", base_url()))
        .bearer_auth(&driver.access_token)
        .json(&json!({ "latitude": 6.5244, "longitude": 3.3792 }))
        .send()
        .await
        .unwrap();
    assert_eq!(ping.status(), StatusCode::OK);

    let available = client
        .get(format!("{}/api/drivers/me/available-orders", base_url()))
        .bearer_auth(&driver.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(available.status(), StatusCode::OK);
}
