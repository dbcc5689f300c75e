//! Review models.

use bookbuddy_core::{BookId, ReviewId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A review row. One per (book, user).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub book_id: BookId,
    pub user_id: UserId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A review joined with its author for the public listing.
///
/// The author columns are nullable because the join is a LEFT JOIN; a
/// reviewer whose account was deleted shows up as anonymous.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithAuthor {
    pub id: ReviewId,
    pub book_id: BookId,
    pub user_id: UserId,
    pub rating: i32,
    pub comment: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Valid rating range, inclusive.
pub const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range() {
        assert!(RATING_RANGE.contains(&1));
        assert!(RATING_RANGE.contains(&5));
        assert!(!RATING_RANGE.contains(&0));
        assert!(!RATING_RANGE.contains(&6));
    }
}
