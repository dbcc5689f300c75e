//! Review repository.

use bookbuddy_core::{BookId, ReviewId, UserId};
use sqlx::PgPool;

use super::{RepositoryError, conflict_on_unique};
use crate::models::{Review, ReviewWithAuthor};

const REVIEW_COLUMNS: &str = "id, book_id, user_id, rating, comment, created_at, updated_at";

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a book's reviews newest first, joined with reviewer identity.
    ///
    /// LEFT JOIN so reviews outlive their author; the routes render missing
    /// authors as anonymous.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_book(
        &self,
        book_id: BookId,
    ) -> Result<Vec<ReviewWithAuthor>, RepositoryError> {
        let reviews = sqlx::query_as::<_, ReviewWithAuthor>(
            r"
            SELECT r.id, r.book_id, r.user_id, r.rating, r.comment,
                   u.name AS author_name, u.email AS author_email,
                   r.created_at, r.updated_at
            FROM reviews r
            LEFT JOIN users u ON u.id = r.user_id
            WHERE r.book_id = $1
            ORDER BY r.created_at DESC
            ",
        )
        .bind(book_id)
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }

    /// Create a review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already reviewed the
    /// book. Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        book_id: BookId,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "INSERT INTO reviews (book_id, user_id, rating, comment) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(book_id)
        .bind(user_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "you have already reviewed this book"))?;

        Ok(review)
    }

    /// Update one of the user's own reviews.
    ///
    /// Returns the number of rows modified; 0 when the review doesn't exist
    /// or belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_own(
        &self,
        user_id: UserId,
        review_id: ReviewId,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE reviews SET rating = $3, comment = $4, updated_at = now() \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(review_id)
        .bind(user_id)
        .bind(rating)
        .bind(comment)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete one of the user's own reviews.
    ///
    /// Returns the number of rows deleted; 0 when the review doesn't exist
    /// or belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_own(
        &self,
        user_id: UserId,
        review_id: ReviewId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND user_id = $2")
            .bind(review_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
