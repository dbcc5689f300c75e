//! End-to-end API tests for BookBuddy.
//!
//! # Running Tests
//!
//! The tests drive a live server over HTTP. Point `BOOKBUDDY_TEST_URL` at a
//! running instance with migrations applied and the catalog seeded:
//!
//! ```bash
//! cargo run -p bookbuddy-cli -- migrate
//! cargo run -p bookbuddy-cli -- seed
//! cargo run -p bookbuddy-server &
//! BOOKBUDDY_TEST_URL=http://localhost:3000 cargo test -p bookbuddy-integration-tests
//! ```
//!
//! When `BOOKBUDDY_TEST_URL` is unset every test returns early, so a plain
//! `cargo test` stays green without infrastructure.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;
use serde_json::{Value, json};

/// Shared context for one test: an HTTP client and the server's base URL.
pub struct TestContext {
    pub client: Client,
    base_url: String,
}

impl TestContext {
    /// Build a context from `BOOKBUDDY_TEST_URL`, or `None` to skip the test.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("BOOKBUDDY_TEST_URL").ok()?;
        Some(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register a throwaway account and return `(token, email)`.
    ///
    /// # Panics
    ///
    /// Panics when registration does not answer 201 with a token; every
    /// caller needs a working account, so failing loudly here is clearer
    /// than failing later.
    pub async fn register_user(&self) -> (String, String) {
        let email = unique_email();
        let resp = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({
                "email": email,
                "password": "reading-is-fun-42",
                "name": "Test Reader",
            }))
            .send()
            .await
            .expect("register request failed");

        assert_eq!(resp.status(), 201, "registration should answer 201");
        let body: Value = resp.json().await.expect("register response not JSON");
        assert_eq!(body["ok"], true);

        let token = body["token"]
            .as_str()
            .expect("register response missing token")
            .to_string();
        (token, email)
    }

    /// Ids of the seeded catalog, for tests that need real books.
    ///
    /// # Panics
    ///
    /// Panics when the catalog is empty; inventory, wishlist, and review
    /// tests need seeded books (`cargo run -p bookbuddy-cli -- seed`).
    pub async fn catalog_book_ids(&self) -> Vec<i64> {
        let resp = self
            .client
            .get(self.url("/api/books"))
            .send()
            .await
            .expect("catalog request failed");
        assert_eq!(resp.status(), 200);

        let body: Value = resp.json().await.expect("catalog response not JSON");
        let ids: Vec<i64> = body["items"]
            .as_array()
            .expect("catalog response missing items")
            .iter()
            .filter_map(|item| item["id"].as_i64())
            .collect();
        assert!(!ids.is_empty(), "catalog is empty; run the seed command");
        ids
    }
}

/// A unique email per test run; nanosecond clock plus the thread id keeps
/// parallel tests from colliding.
#[must_use]
pub fn unique_email() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let thread: String = format!("{:?}", std::thread::current().id())
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    format!("reader-{nanos}-{thread}@test.bookbuddy.example")
}
