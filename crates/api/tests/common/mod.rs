#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taproom_api::auth::credentials::ApiCredentials;
use taproom_api::auth::jwt::JwtConfig;
use taproom_api::config::{ServerConfig, StoreBackend};
use taproom_api::router::build_app_router;
use taproom_api::state::AppState;

pub const TEST_USER: &str = "tester";
pub const TEST_PASSWORD: &str = "tester-password";

pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Hashed once per test binary; Argon2 is slow in debug builds.
pub fn test_credentials() -> ApiCredentials {
    static CREDENTIALS: OnceLock<ApiCredentials> = OnceLock::new();
    CREDENTIALS
        .get_or_init(|| ApiCredentials::new(TEST_USER, TEST_PASSWORD).unwrap())
        .clone()
}

/// Build a test `ServerConfig` with safe defaults and the in-memory backend.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        bootstrap_data: false,
        beer_csv_path: PathBuf::from("../../data/beers.csv"),
        jwt: test_jwt(),
        credentials: test_credentials(),
    }
}

/// Fresh in-memory state.
pub fn test_state() -> AppState {
    AppState::in_memory(test_config())
}

/// Full application router (same middleware stack as production) over a
/// fresh in-memory store.
pub fn build_test_app() -> Router {
    build_app(test_state())
}

/// Full application router over PostgreSQL.
pub fn build_pg_test_app(pool: PgPool) -> Router {
    let config = ServerConfig {
        store_backend: StoreBackend::Postgres,
        ..test_config()
    };
    build_app(AppState::postgres(pool, config))
}

pub fn build_app(state: AppState) -> Router {
    let config = state.config.as_ref().clone();
    build_app_router(state, &config)
}

/// A valid Bearer token for the test JWT secret.
pub fn token() -> String {
    test_jwt().issue(TEST_USER).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers (authenticated)
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token()));

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// GET without any Authorization header.
pub async fn get_anonymous(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body without any Authorization header.
pub async fn post_anonymous(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET with a caller-chosen Bearer token.
pub async fn get_with_token(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn beer_json(name: &str, style: &str) -> serde_json::Value {
    serde_json::json!({
        "beerName": name,
        "beerStyle": style,
        "upc": "12356",
        "price": "12.99",
        "quantityOnHand": 122
    })
}

/// Create a beer and return its id.
pub async fn create_beer(app: &Router, name: &str, style: &str) -> String {
    let response = post_json(app.clone(), "/api/v1/beer", beer_json(name, style)).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}
