/// Router tests for login and token refresh

mod common;

use axum::http::{Method, StatusCode};
use common::TestContext;
use helpdesk_shared::models::user::User;
use helpdesk_shared::services::store::UserStore;
use serde_json::json;

const PASSWORD: &str = "correct horse battery staple";

async fn with_login_user(ctx: &TestContext) -> User {
    let user = ctx
        .store
        .insert_user_with_password("Grace", "grace@example.com", "admin", PASSWORD)
        .await
        .unwrap();
    let support = ctx.store.insert_queue("Support", "#ff0000").await;
    ctx.store
        .replace_user_queues(user.id, &[support.id])
        .await
        .unwrap();
    user
}

#[tokio::test]
async fn test_login_returns_tokens_and_user() {
    let ctx = TestContext::new().await;
    let user = with_login_user(&ctx).await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/v1/auth/login",
            None,
            Some(json!({ "email": "grace@example.com", "password": PASSWORD }).to_string()),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["user"]["id"], user.id.to_string());
    assert_eq!(body["user"]["profile"], "admin");
    assert_eq!(body["user"]["queues"][0]["name"], "Support");
    assert!(body["user"].get("password_hash").is_none());

    // The access token opens protected routes
    let access = body["access_token"].as_str().unwrap().to_string();
    let (status, shown) = ctx
        .send(
            Method::GET,
            &format!("/v1/users/{}", ctx.agent.id),
            Some(&access),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown["id"], ctx.agent.id.to_string());

    // The refresh token can be exchanged for a new access token
    let refresh = body["refresh_token"].as_str().unwrap();
    let (status, refreshed) = ctx
        .send(
            Method::POST,
            "/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": refresh }).to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(refreshed["access_token"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let ctx = TestContext::new().await;
    with_login_user(&ctx).await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/v1/auth/login",
            None,
            Some(json!({ "email": "grace@example.com", "password": "wrong" }).to_string()),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let ctx = TestContext::new().await;
    with_login_user(&ctx).await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/v1/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD }).to_string()),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}
