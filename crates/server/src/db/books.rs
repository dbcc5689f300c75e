//! Book repository for catalog queries.

use bookbuddy_core::BookId;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{Book, BookListItem};

/// Maximum page size for catalog listings.
pub const MAX_LIMIT: i64 = 2000;
/// Default page size for catalog listings.
pub const DEFAULT_LIMIT: i64 = 1000;

/// Filters for a catalog listing.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Full-text query against title and author.
    pub q: Option<String>,
    /// Case-insensitive genre substring.
    pub genre: Option<String>,
    /// Page size; clamped to [`MAX_LIMIT`].
    pub limit: Option<i64>,
    /// Offset; floored at 0.
    pub skip: Option<i64>,
}

impl CatalogFilter {
    /// Effective limit after clamping.
    #[must_use]
    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Effective offset after flooring at 0.
    #[must_use]
    pub fn effective_skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }
}

/// Repository for book catalog operations.
pub struct BookRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookRepository<'a> {
    /// Create a new book repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List English-language books matching the filter.
    ///
    /// In-stock books sort first, then most recently touched. Rows without a
    /// genre list as "Manga".
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &CatalogFilter) -> Result<Vec<BookListItem>, RepositoryError> {
        let q = filter.q.as_deref().filter(|s| !s.trim().is_empty());
        let genre = filter.genre.as_deref().filter(|s| !s.trim().is_empty());

        let items = sqlx::query_as::<_, BookListItem>(
            r"
            SELECT id, title, author, cover_url, isbn,
                   COALESCE(genre, 'Manga') AS genre, quantity
            FROM books
            WHERE language = 'en'
              AND ($1::text IS NULL
                   OR to_tsvector('english', title || ' ' || author)
                      @@ websearch_to_tsquery('english', $1))
              AND ($2::text IS NULL OR genre ILIKE '%' || $2 || '%')
            ORDER BY quantity DESC, updated_at DESC, created_at DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(q)
        .bind(genre)
        .bind(filter.effective_limit())
        .bind(filter.effective_skip())
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Get a book by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let book = sqlx::query_as::<_, Book>(
            r"
            SELECT id, title, author, isbn, summary, cover_url, language,
                   genre, quantity, source, created_at, updated_at
            FROM books
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(book)
    }

    /// Read a book's current stock quantity.
    ///
    /// Returns `None` for an unknown book.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn quantity(&self, id: BookId) -> Result<Option<i32>, RepositoryError> {
        let quantity: Option<(i32,)> = sqlx::query_as("SELECT quantity FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(quantity.map(|(q,)| q))
    }

    /// Set a book's stock quantity.
    ///
    /// Returns the number of rows modified (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_quantity(&self, id: BookId, quantity: i32) -> Result<u64, RepositoryError> {
        let result =
            sqlx::query("UPDATE books SET quantity = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(quantity)
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// Delete a book.
    ///
    /// Returns the number of rows deleted (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: BookId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_clamped() {
        let filter = CatalogFilter {
            limit: Some(50_000),
            ..Default::default()
        };
        assert_eq!(filter.effective_limit(), MAX_LIMIT);
    }

    #[test]
    fn test_limit_defaults() {
        assert_eq!(CatalogFilter::default().effective_limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_skip_floored_at_zero() {
        let filter = CatalogFilter {
            skip: Some(-5),
            ..Default::default()
        };
        assert_eq!(filter.effective_skip(), 0);
    }
}
