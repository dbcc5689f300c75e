//! Cart repository.
//!
//! The cart is a single JSONB document per user, replaced wholesale on every
//! save. Last writer wins; there is no merging.

use bookbuddy_core::UserId;
use sqlx::PgPool;
use sqlx::types::Json;

use super::RepositoryError;
use crate::models::{Cart, CartItem};

const CART_COLUMNS: &str = "id, user_id, items, created_at, updated_at";

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user's cart, if one has been saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let cart = sqlx::query_as::<_, Cart>(&format!(
            "SELECT {CART_COLUMNS} FROM carts WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(cart)
    }

    /// Replace the user's cart with the given items, creating the row if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(
        &self,
        user_id: UserId,
        items: &[CartItem],
    ) -> Result<Cart, RepositoryError> {
        let cart = sqlx::query_as::<_, Cart>(&format!(
            "INSERT INTO carts (user_id, items) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) \
             DO UPDATE SET items = EXCLUDED.items, updated_at = now() \
             RETURNING {CART_COLUMNS}"
        ))
        .bind(user_id)
        .bind(Json(items))
        .fetch_one(self.pool)
        .await?;

        Ok(cart)
    }

    /// Drop the user's cart row.
    ///
    /// Returns the number of rows deleted (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM carts WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
