//! HTTP-level integration tests for registration, login and the caller's
//! own account (`/users/me`).

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, login, post_json, put_json_auth, register,
    register_and_login, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;
use todoapp_api::auth::jwt::generate_access_token;
use todoapp_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = register(&app, "alice").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["username"], "alice");
    assert_eq!(json["fullName"], "alice tester");
    assert!(json.get("data").is_none(), "auth responses are not enveloped");

    let stored = UserRepo::find_by_username(&pool, "alice").await.unwrap().unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$"));
    assert_ne!(stored.password_hash, TEST_PASSWORD);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_username_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);

    assert_eq!(register(&app, "alice").await.status(), StatusCode::CREATED);
    let response = register(&app, "alice").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "ALREADY_EXISTS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_weak_password_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "fullName": "Alice",
        "username": "alice",
        "password": "secret",
        "confirmPassword": "secret",
    });
    let response = post_json(&app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let msg = json["error"].as_str().unwrap();
    assert!(msg.contains("uppercase"));
    assert!(msg.contains("digit"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_mismatched_confirmation_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "fullName": "Alice",
        "username": "alice",
        "password": TEST_PASSWORD,
        "confirmPassword": "Secret2!",
    });
    let response = post_json(&app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Passwords do not match");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_malformed_json_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(&app, "/api/v1/auth/register", json!({ "username": "alice" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(&app, "alice").await;

    let response = login(&app, "alice", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["accessToken"].is_string());
    assert!(json["expiresAt"].is_string());
}

/// Unknown user, wrong password and deactivated user all look the same.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register(&app, "alice").await;
    register(&app, "bob").await;
    let bob = UserRepo::find_by_username(&pool, "bob").await.unwrap().unwrap();
    UserRepo::deactivate(&pool, bob.id).await.unwrap();

    let mut bodies = Vec::new();
    for (username, password) in [
        ("ghost", TEST_PASSWORD),
        ("alice", "Wrong1!!"),
        ("bob", TEST_PASSWORD),
    ] {
        let response = login(&app, username, password).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{username}");
        bodies.push(body_json(response).await);
    }

    assert_eq!(bodies[0]["code"], "INVALID_CREDENTIALS");
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[1], bodies[2]);
}

// ---------------------------------------------------------------------------
// Identity resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_protected_route_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(&app, "/api/v1/todos").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHENTICATED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_garbage_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(&app, "/api/v1/users/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_from_other_issuer_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register(&app, "alice").await;
    let alice = UserRepo::find_by_username(&pool, "alice").await.unwrap().unwrap();

    let mut config = common::test_config().jwt;
    config.issuer = "elsewhere".to_string();
    let issued = generate_access_token(alice.id, "alice", &config).unwrap();

    let response = get_auth(&app, "/api/v1/users/me", &issued.token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// /users/me
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_round_trip(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "alice").await;

    let response = get_auth(&app, "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "alice");
    assert_eq!(json["data"]["todoPoints"], 0);
    assert!(json["data"].get("passwordHash").is_none());

    let response = put_json_auth(
        &app,
        "/api/v1/users/me",
        &token,
        json!({ "fullName": "Alice Renamed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["fullName"], "Alice Renamed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivation_revokes_access(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "alice").await;

    let response = delete_auth(&app, "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The old token no longer resolves to a user.
    for uri in ["/api/v1/users/me", "/api/v1/todos", "/api/v1/categories"] {
        let response = get_auth(&app, uri, &token).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    // And logging in again fails like any bad credential.
    let response = login(&app, "alice", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The name stays taken.
    let response = register(&app, "alice").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
