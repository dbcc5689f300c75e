//! Order models.
//!
//! Order lines and the shipping address are stored as JSONB documents, the
//! shape the checkout client posts them in.

use bookbuddy_core::{BookId, OrderId, OrderNumber, OrderStatus, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

/// One line of an order, captured at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub book_id: BookId,
    pub title: String,
    pub quantity: i32,
    pub price: Decimal,
    #[serde(rename = "cover", default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

/// Shipping address captured at checkout.
///
/// Only `full_name`, `phone`, and `street` are required; the rest is kept
/// verbatim for the packing slip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub phone: String,
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ShippingAddress {
    /// Whether the required fields are all present and non-blank.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.full_name.trim().is_empty()
            && !self.phone.trim().is_empty()
            && !self.street.trim().is_empty()
    }
}

/// An order row.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_number: OrderNumber,
    pub user_id: UserId,
    pub items: Json<Vec<OrderItem>>,
    pub shipping_address: Json<ShippingAddress>,
    pub total: Decimal,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_address_completeness() {
        let mut address = ShippingAddress {
            full_name: "Nok P.".to_string(),
            phone: "+66 81 000 0000".to_string(),
            street: "1 Sukhumvit Rd".to_string(),
            city: None,
            postal_code: None,
            country: None,
        };
        assert!(address.is_complete());

        address.phone = "   ".to_string();
        assert!(!address.is_complete());
    }

    #[test]
    fn test_order_item_wire_shape() {
        let json = r#"{"bookId": 3, "title": "Naruto, Vol. 1", "quantity": 2, "price": "220"}"#;
        let item: OrderItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.book_id, BookId::new(3));
        assert_eq!(item.quantity, 2);
        assert!(item.cover_url.is_none());
    }

    #[test]
    fn test_order_item_cover_key() {
        let json = r#"{"bookId": 3, "title": "Naruto, Vol. 1", "quantity": 2, "price": "220",
                       "cover": "https://covers.example/naruto-1.jpg"}"#;
        let item: OrderItem = serde_json::from_str(json).unwrap();
        assert_eq!(
            item.cover_url.as_deref(),
            Some("https://covers.example/naruto-1.jpg")
        );

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["cover"], "https://covers.example/naruto-1.jpg");
        assert!(value.get("coverUrl").is_none());
    }
}
