//! Wishlist repository.

use bookbuddy_core::{BookId, UserId, WishlistEntryId};
use sqlx::PgPool;

use super::{RepositoryError, conflict_on_unique};
use crate::models::WishlistBook;

/// Repository for wishlist database operations.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's wishlist joined with live book data, newest first.
    ///
    /// The inner join drops entries whose book has been deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WishlistBook>, RepositoryError> {
        let items = sqlx::query_as::<_, WishlistBook>(
            r"
            SELECT w.id AS entry_id, b.id AS book_id, b.title, b.author,
                   b.cover_url, b.isbn, b.genre, b.quantity, w.added_at
            FROM wishlist w
            JOIN books b ON b.id = w.book_id
            WHERE w.user_id = $1
            ORDER BY w.added_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Add a book to the user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the pair already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(
        &self,
        user_id: UserId,
        book_id: BookId,
    ) -> Result<WishlistEntryId, RepositoryError> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO wishlist (user_id, book_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "book already in wishlist"))?;

        Ok(WishlistEntryId::new(id))
    }

    /// Remove a book from the user's wishlist.
    ///
    /// Returns the number of rows deleted (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(&self, user_id: UserId, book_id: BookId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM wishlist WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
