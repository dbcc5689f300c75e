//! Persisted cart model.

use bookbuddy_core::{BookId, CartId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

/// One cart line, in the shape the client keeps it.
///
/// The cart is a client-owned document; the server stores it wholesale and
/// hands it back. No stock or price checks happen here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: BookId,
    pub title: String,
    pub price: Decimal,
    pub qty: i32,
    #[serde(rename = "cover", default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

/// A user's persisted cart. One row per user.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub items: Json<Vec<CartItem>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
