#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use todoapp_api::auth::jwt::JwtConfig;
use todoapp_api::config::{LogFormat, ServerConfig};
use todoapp_api::router::build_app_router;
use todoapp_api::state::AppState;

pub const TEST_PASSWORD: &str = "Secret1!";

/// Build a test `ServerConfig` with a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        db_max_connections: 5,
        cors_origins: vec![HeaderValue::from_static("http://localhost:3000")],
        request_timeout_secs: 30,
        log_format: LogFormat::Pretty,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_mins: 60,
            issuer: "todoapp".to_string(),
            audience: "todoapp-web".to_string(),
        },
    }
}

/// Build the full application router (same middleware stack as production)
/// on top of the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_auth(app: &Router, uri: &str, token: &str, body: Option<Value>) -> Response {
    send(app, Method::PATCH, uri, Some(token), body).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register `username` through the API with [`TEST_PASSWORD`].
pub async fn register(app: &Router, username: &str) -> Response {
    let body = serde_json::json!({
        "fullName": format!("{username} tester"),
        "username": username,
        "password": TEST_PASSWORD,
        "confirmPassword": TEST_PASSWORD,
    });
    post_json(app, "/api/v1/auth/register", body).await
}

/// Log in and return the access token.
pub async fn login(app: &Router, username: &str, password: &str) -> Response {
    let body = serde_json::json!({ "username": username, "password": password });
    post_json(app, "/api/v1/auth/login", body).await
}

/// Register then log in, returning a bearer token.
pub async fn register_and_login(app: &Router, username: &str) -> String {
    let response = register(app, username).await;
    assert_eq!(response.status(), 201, "registration of {username} failed");

    let response = login(app, username, TEST_PASSWORD).await;
    assert_eq!(response.status(), 200, "login of {username} failed");
    let json = body_json(response).await;
    json["accessToken"].as_str().unwrap().to_string()
}

/// Create a todo and return its `data` object.
pub async fn create_todo(app: &Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app, "/api/v1/todos", token, body).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"].clone()
}

/// Create a category and return its `data` object.
pub async fn create_category(app: &Router, token: &str, name: &str) -> Value {
    let response = post_json_auth(
        app,
        "/api/v1/categories",
        token,
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"].clone()
}
