mod common;

use axum::http::StatusCode;
use common::{TEST_SECRET, setup_test_app};
use serde_json::json;
use userhub_auth::{Claims, Role, create_access_token, issue_token};
use userhub_config::JwtConfig;

async fn registered_app() -> common::TestApp {
    let app = setup_test_app();
    app.send(
        "POST",
        "/api/users",
        None,
        Some(json!({
            "username": "test",
            "password": "test",
            "name": "test",
            "email": "test@gmail.com"
        })),
    )
    .await;
    app
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = registered_app().await;

    let (status, body) = app.send("GET", "/api/users/current", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized: No token provided");
}

#[tokio::test]
async fn test_empty_bearer_is_unauthorized() {
    let app = registered_app().await;

    let (status, _) = app
        .send("GET", "/api/users/current", Some("Bearer "), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_forbidden() {
    let app = registered_app().await;

    let (status, body) = app
        .send("GET", "/api/users/current", Some("wrong"), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_expired_token_is_forbidden() {
    let app = registered_app().await;
    let claims = Claims::new("test", "test", "test@gmail.com", Role::User, -60);
    let token = issue_token(&claims, TEST_SECRET).unwrap();

    let (status, body) = app
        .send(
            "GET",
            "/api/users/current",
            Some(&format!("Bearer {}", token)),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_forbidden() {
    let app = registered_app().await;
    let other = JwtConfig::new("different-secret-key-at-least-32-characters", 1800);
    let token = create_access_token("test", "test", "test@gmail.com", Role::Admin, &other).unwrap();

    let (status, _) = app
        .send(
            "GET",
            "/api/users/current",
            Some(&format!("Bearer {}", token)),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_without_bearer_prefix_is_accepted() {
    let app = registered_app().await;
    let token =
        create_access_token("test", "test", "test@gmail.com", Role::User, &app.jwt_config).unwrap();

    let (status, body) = app
        .send("GET", "/api/users/current", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "test");
}

#[tokio::test]
async fn test_public_routes_ignore_bad_tokens() {
    let app = registered_app().await;

    let (status, _) = app
        .send(
            "POST",
            "/api/users/login",
            Some("wrong"),
            Some(json!({ "username": "test", "password": "test" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_user_token_rejected_on_admin_route() {
    let app = registered_app().await;
    let token = app.login("test", "test").await;

    let (status, body) = app
        .send("DELETE", "/api/users/someone", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");
}

#[tokio::test]
async fn test_delete_without_token_is_unauthorized() {
    let app = registered_app().await;

    let (status, _) = app.send("DELETE", "/api/users/test", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.accounts.len().await, 1);
}

#[tokio::test]
async fn test_role_change_is_not_retroactive() {
    let app = registered_app().await;
    let user_token = app.login("test", "test").await;

    // Self-promotion through PATCH is allowed...
    let (status, body) = app
        .send(
            "PATCH",
            "/api/users/current",
            Some(&user_token),
            Some(json!({ "role": "ADMIN" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "ADMIN");

    // ...but the old token still carries USER.
    let (status, _) = app
        .send("DELETE", "/api/users/test", Some(&user_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A fresh login picks up the new role.
    let admin_token = app.login("test", "test").await;
    let (status, _) = app
        .send("DELETE", "/api/users/test", Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_test_app();

    let (status, _) = app.send("GET", "/api/nothing", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
