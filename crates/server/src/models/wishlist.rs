//! Wishlist models.

use bookbuddy_core::{BookId, WishlistEntryId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A wishlist entry joined with its live book data.
///
/// Produced by an inner join, so entries whose book has since been deleted
/// never appear.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistBook {
    pub entry_id: WishlistEntryId,
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    #[serde(rename = "cover")]
    pub cover_url: Option<String>,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}
