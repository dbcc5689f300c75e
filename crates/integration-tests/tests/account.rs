//! Account management tests: password change, account deletion.
//!
//! Skipped unless `BOOKBUDDY_TEST_URL` points at a running server.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};

use bookbuddy_integration_tests::TestContext;

#[tokio::test]
async fn test_update_password_requires_body() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let (token, _) = ctx.register_user().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/account/update-password"))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Too short
    let resp = ctx
        .client
        .post(ctx.url("/api/account/update-password"))
        .bearer_auth(&token)
        .json(&json!({"newPassword": "abc"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_update_password_switches_credentials() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let (token, email) = ctx.register_user().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/account/update-password"))
        .bearer_auth(&token)
        .json(&json!({"newPassword": "a-brand-new-secret-9"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Old password no longer works
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/login"))
        .json(&json!({"email": email, "password": "reading-is-fun-42"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // New one does
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/login"))
        .json(&json!({"email": email, "password": "a-brand-new-secret-9"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_delete_account_reports_counts_and_revokes_login() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let (token, email) = ctx.register_user().await;

    // Leave a cart behind so the counts have something to report
    ctx.client
        .post(ctx.url("/api/cart"))
        .bearer_auth(&token)
        .json(&json!({"items": [{"id": 1, "title": "One Piece Vol. 1", "price": "250", "qty": 1}]}))
        .send()
        .await
        .unwrap();

    let resp = ctx
        .client
        .delete(ctx.url("/api/account/delete"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["deleted"]["users"], 1);
    assert_eq!(body["deleted"]["carts"], 1);

    // The account is gone
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/login"))
        .json(&json!({"email": email, "password": "reading-is-fun-42"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Deleting again answers 404
    let resp = ctx
        .client
        .delete(ctx.url("/api/account/delete"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
