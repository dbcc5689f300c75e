//! Book catalog models.

use bookbuddy_core::{BookId, Price, derive_list_price};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A full catalog entry, as stored in the `books` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub summary: Option<String>,
    pub cover_url: Option<String>,
    pub language: String,
    pub genre: Option<String>,
    pub quantity: i32,
    /// Where the record came from (e.g. "google-books", "seed").
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Derived display price for the book detail page.
    ///
    /// Catalog rows carry no price column; the price is a pure function of
    /// the ISBN (or id) and summary length.
    #[must_use]
    pub fn list_price(&self) -> Price {
        derive_list_price(
            self.isbn.as_deref(),
            &self.id.to_string(),
            self.summary.as_deref().map_or(0, str::len),
        )
    }
}

/// Slim projection for catalog listings; the summary stays out of list
/// payloads.
///
/// Item shapes on the wire carry the image under `cover`, and a missing
/// genre defaults to "Manga" (the repository query applies the fallback).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListItem {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(rename = "cover")]
    pub cover_url: Option<String>,
    pub isbn: Option<String>,
    pub genre: String,
    pub quantity: i32,
}
