//! Registration, login and user_info

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use blink::backend::auth::resolve_identity;

use crate::common::{TestContext, PASSWORD};

fn registration(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "bio": "just here",
        "email": email,
        "password": "s3cret-pass",
        "avatar": "https://cdn/avatar.png",
    })
}

#[tokio::test]
async fn test_register_login_user_info() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/users/register")
        .json(&registration("alice", "Alice@Example.com"))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"message": "User registered successfully!"}));

    let response = server
        .post("/users/login")
        .json(&json!({"email": "  ALICE@example.com ", "password": "s3cret-pass"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Login successful");
    let token = body["access_token"].as_str().unwrap().to_string();
    assert_eq!(resolve_identity(Some(&token)).unwrap().email, "alice@example.com");

    let response = server
        .get("/users/user_info")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let user = &response.json::<Value>()["user"];
    assert_eq!(user["username"], "alice");
    assert_eq!(user["email"], "alice@example.com");
    assert_eq!(user["bio"], "just here");
    assert_eq!(user["theme"], "synthwave");
    assert_eq!(user["friendsList"], json!([]));
    assert!(user.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_rejects_taken_names() {
    let ctx = TestContext::new();
    let server = ctx.server();
    server
        .post("/users/register")
        .json(&registration("alice", "alice@example.com"))
        .await
        .assert_status_ok();

    let response = server
        .post("/users/register")
        .json(&registration("ALICE", "new@example.com"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"error": "Username already taken", "status": 400}));

    let response = server
        .post("/users/register")
        .json(&registration("bob", "alice@EXAMPLE.com"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Email already taken");
}

#[tokio::test]
async fn test_register_rejects_self_label_username() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/users/register")
        .json(&registration("User", "user@example.com"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"error": "Username is reserved", "status": 400}));
}

#[tokio::test]
async fn test_login_failures() {
    let ctx = TestContext::new();
    ctx.seed_user("alice").await;
    let server = ctx.server();

    let response = server
        .post("/users/login")
        .json(&json!({"email": "nobody@example.com", "password": PASSWORD}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Invalid email");

    let response = server
        .post("/users/login")
        .json(&json!({"email": "alice@example.com", "password": "nope"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Invalid email or password");

    server
        .post("/users/login")
        .json(&json!({"email": "alice@example.com", "password": PASSWORD}))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_protected_routes_need_a_token() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/users/user_info").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({"error": "Invalid token", "status": 401}));

    let response = server
        .put("/users/mark_all_notifications_seen")
        .authorization_bearer("not-a-jwt")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
