//! Auth flow tests: register, login, token introspection, logout.
//!
//! Skipped unless `BOOKBUDDY_TEST_URL` points at a running server.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};

use bookbuddy_integration_tests::{TestContext, unique_email};

#[tokio::test]
async fn test_health() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_register_then_me() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let (token, email) = ctx.register_user().await;

    let resp = ctx
        .client
        .get(ctx.url("/api/auth/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["authed"], true);
    assert_eq!(body["user"]["email"], Value::String(email));
}

#[tokio::test]
async fn test_register_requires_email_and_password() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let resp = ctx
        .client
        .post(ctx.url("/api/auth/register"))
        .json(&json!({"email": unique_email()}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let (_, email) = ctx.register_user().await;

    // Same address with different case still collides
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/register"))
        .json(&json!({
            "email": email.to_uppercase(),
            "password": "another-password-1",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn test_login_wrong_password_then_right() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let (_, email) = ctx.register_user().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/auth/login"))
        .json(&json!({"email": email, "password": "definitely-wrong"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = ctx
        .client
        .post(ctx.url("/api/auth/login"))
        .json(&json!({"email": email, "password": "reading-is-fun-42"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_me_is_anonymous_without_valid_token() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    // No token: still 200, just not authed
    let resp = ctx.client.get(ctx.url("/api/auth/me")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["authed"], false);

    // Garbage token: same
    let resp = ctx
        .client
        .get(ctx.url("/api/auth/me"))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["authed"], false);
}

#[tokio::test]
async fn test_logout() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let resp = ctx
        .client
        .post(ctx.url("/api/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
}
