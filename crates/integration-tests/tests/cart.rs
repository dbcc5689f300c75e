//! Cart persistence tests: wholesale upsert, last-writer-wins, clearing.
//!
//! Skipped unless `BOOKBUDDY_TEST_URL` points at a running server.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};

use bookbuddy_integration_tests::TestContext;

#[tokio::test]
async fn test_cart_requires_auth() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let resp = ctx.client.get(ctx.url("/api/cart")).send().await.unwrap();
    assert_eq!(resp.status(), 401);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn test_cart_starts_empty() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let (token, _) = ctx.register_user().await;

    let resp = ctx
        .client
        .get(ctx.url("/api/cart"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_cart_save_is_wholesale_replace() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let (token, _) = ctx.register_user().await;

    let first = json!({"items": [
        {"id": 1, "title": "One Piece Vol. 1", "price": "250", "qty": 2},
        {"id": 2, "title": "Naruto Vol. 1", "price": "220", "qty": 1},
    ]});
    let resp = ctx
        .client
        .post(ctx.url("/api/cart"))
        .bearer_auth(&token)
        .json(&first)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // A second save replaces, never merges
    let second = json!({"items": [
        {"id": 3, "title": "Demon Slayer Vol. 1", "price": "260", "qty": 1},
    ]});
    let resp = ctx
        .client
        .post(ctx.url("/api/cart"))
        .bearer_auth(&token)
        .json(&second)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = ctx
        .client
        .get(ctx.url("/api/cart"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 3);
}

#[tokio::test]
async fn test_cart_save_rejects_missing_items() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let (token, _) = ctx.register_user().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/cart"))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_cart_clear() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let (token, _) = ctx.register_user().await;

    ctx.client
        .post(ctx.url("/api/cart"))
        .bearer_auth(&token)
        .json(&json!({"items": [{"id": 1, "title": "One Piece Vol. 1", "price": "250", "qty": 1}]}))
        .send()
        .await
        .unwrap();

    let resp = ctx
        .client
        .delete(ctx.url("/api/cart"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["deleted"], 1);

    let resp = ctx
        .client
        .get(ctx.url("/api/cart"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["items"], json!([]));
}
