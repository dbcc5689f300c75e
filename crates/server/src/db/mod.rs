//! Database operations for the BookBuddy `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `books` - Catalog entries (English-language manga and books)
//! - `users` - Accounts and credentials
//! - `orders` - Orders with JSONB line items and shipping address
//! - `carts` - One persisted cart row per user (JSONB items)
//! - `wishlist` - (user, book) pairs
//! - `reviews` - One review per (book, user)
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p bookbuddy-cli -- migrate
//! ```
//!
//! Queries are runtime-bound (`query`/`query_as` + `FromRow`) so the
//! workspace builds without a live database.

pub mod books;
pub mod carts;
pub mod orders;
pub mod reviews;
pub mod users;
pub mod wishlist;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use books::BookRepository;
pub use carts::CartRepository;
pub use orders::OrderRepository;
pub use reviews::ReviewRepository;
pub use users::UserRepository;
pub use wishlist::WishlistRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map a unique-constraint violation to [`RepositoryError::Conflict`].
fn conflict_on_unique(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
