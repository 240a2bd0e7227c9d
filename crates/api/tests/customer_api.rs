//! HTTP-level integration tests for the `/customer` endpoints.

mod common;

use std::sync::Arc;

use axum::http::{header, StatusCode};
use common::{
    body_json, build_app, build_test_app, delete, get, patch_json, post_json, put_json,
    test_config,
};
use serde_json::json;
use taproom_api::services::{BeerService, CustomerService};
use taproom_api::state::AppState;
use taproom_db::models::beer_order::BeerOrder;
use taproom_db::store::{BeerOrderStore, MemoryStore};
use uuid::Uuid;

async fn create_customer(app: &axum::Router, name: &str) -> String {
    let response = post_json(app.clone(), "/api/v1/customer", json!({"name": name})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn customer_crud_round_trip() {
    let app = build_test_app();

    let response = post_json(
        app.clone(),
        "/api/v1/customer",
        json!({"name": "Customer 1", "email": "one@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let created = body_json(response).await;
    assert_eq!(created["data"]["name"], "Customer 1");
    assert_eq!(created["data"]["version"], 0);

    let response = put_json(
        app.clone(),
        &location,
        json!({"name": "Customer One", "email": null}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = body_json(get(app.clone(), &location).await).await;
    assert_eq!(fetched["data"]["name"], "Customer One");
    assert!(fetched["data"]["email"].is_null());
    assert_eq!(fetched["data"]["version"], 1);

    assert_eq!(delete(app.clone(), &location).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(app, &location).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_customers_is_paged_by_name() {
    let app = build_test_app();
    for name in ["Customer 3", "Customer 1", "Customer 2"] {
        create_customer(&app, name).await;
    }

    let json = body_json(get(app, "/api/v1/customer?pageSize=2").await).await;
    assert_eq!(json["data"]["totalElements"], 3);
    assert_eq!(json["data"]["totalPages"], 2);
    assert_eq!(json["data"]["content"][0]["name"], "Customer 1");
    assert_eq!(json["data"]["content"][1]["name"], "Customer 2");
}

#[tokio::test]
async fn patch_email_then_clear_it() {
    let app = build_test_app();
    let id = create_customer(&app, "Customer 1").await;
    let uri = format!("/api/v1/customer/{id}");

    let response = patch_json(app.clone(), &uri, json!({"email": "c1@example.com"})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let json = body_json(get(app.clone(), &uri).await).await;
    assert_eq!(json["data"]["email"], "c1@example.com");
    assert_eq!(json["data"]["name"], "Customer 1");

    let response = patch_json(app.clone(), &uri, json!({"email": null})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let json = body_json(get(app, &uri).await).await;
    assert!(json["data"]["email"].is_null());
}

#[tokio::test]
async fn invalid_customer_input_returns_400() {
    let app = build_test_app();

    let response = post_json(app.clone(), "/api/v1/customer", json!({"name": "  "})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let id = create_customer(&app, "Customer 1").await;
    let response = patch_json(
        app,
        &format!("/api/v1/customer/{id}"),
        json!({"email": "not-an-email"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_unknown_customer_returns_404() {
    let app = build_test_app();
    let response = delete(app, "/api/v1/customer/8d3c9e6e-0000-4000-8000-000000000000").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn list_customers_treats_empty_paging_as_defaults() {
    let app = build_test_app();
    create_customer(&app, "Customer 1").await;

    let response = get(app, "/api/v1/customer?pageNumber=&pageSize=").await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = &body_json(response).await["data"];
    assert_eq!(page["totalElements"], 1);
    assert_eq!(page["pageSize"], 25);
}

#[tokio::test]
async fn delete_customer_with_orders_returns_409() {
    let store = Arc::new(MemoryStore::new());
    let app = build_app(AppState {
        pool: None,
        config: Arc::new(test_config()),
        beers: BeerService::new(store.clone()),
        customers: CustomerService::new(store.clone()),
    });
    let id = create_customer(&app, "Customer 1").await;
    let customer_id: Uuid = id.parse().unwrap();
    BeerOrderStore::save(store.as_ref(), BeerOrder::new(customer_id, None))
        .await
        .unwrap();

    let response = delete(app.clone(), &format!("/api/v1/customer/{id}")).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
    let response = get(app, &format!("/api/v1/customer/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
