//! Status enums for orders and user accounts.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// `Processing`, `Shipped`, and `Delivered` are *reducing* statuses: while an
/// order sits in one of them, its line quantities are considered removed from
/// book inventory. `Pending` and `Cancelled` are non-reducing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All valid statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Whether this status holds stock out of inventory.
    #[must_use]
    pub const fn is_reducing(self) -> bool {
        matches!(self, Self::Processing | Self::Shipped | Self::Delivered)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        })
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for OrderStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OrderStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for OrderStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.to_string(), buf)
    }
}

/// Inventory effect of an order status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockEffect {
    /// Both statuses are in the same class; inventory is untouched.
    None,
    /// Entering a reducing status: deduct each line's quantity, floored at 0.
    Deduct,
    /// Leaving the reducing class: restore each line's quantity.
    Restore,
}

/// Classify the inventory effect of moving an order from `previous` to `next`.
///
/// Only crossing the reducing/non-reducing boundary touches inventory;
/// transitions within a class (e.g. shipped -> delivered) are no-ops.
#[must_use]
pub const fn stock_effect(previous: OrderStatus, next: OrderStatus) -> StockEffect {
    match (previous.is_reducing(), next.is_reducing()) {
        (false, true) => StockEffect::Deduct,
        (true, false) => StockEffect::Restore,
        _ => StockEffect::None,
    }
}

/// User account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Admin => "admin",
        })
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// User account status. Only `Active` accounts may log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Disabled,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
        })
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "disabled" => Ok(Self::Disabled),
            _ => Err(format!("invalid account status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reducing_classification() {
        assert!(!OrderStatus::Pending.is_reducing());
        assert!(OrderStatus::Processing.is_reducing());
        assert!(OrderStatus::Shipped.is_reducing());
        assert!(OrderStatus::Delivered.is_reducing());
        assert!(!OrderStatus::Cancelled.is_reducing());
    }

    #[test]
    fn test_stock_effect_entering_reducing() {
        assert_eq!(
            stock_effect(OrderStatus::Pending, OrderStatus::Processing),
            StockEffect::Deduct
        );
        assert_eq!(
            stock_effect(OrderStatus::Cancelled, OrderStatus::Shipped),
            StockEffect::Deduct
        );
    }

    #[test]
    fn test_stock_effect_leaving_reducing() {
        assert_eq!(
            stock_effect(OrderStatus::Processing, OrderStatus::Pending),
            StockEffect::Restore
        );
        assert_eq!(
            stock_effect(OrderStatus::Delivered, OrderStatus::Cancelled),
            StockEffect::Restore
        );
    }

    #[test]
    fn test_stock_effect_within_class() {
        assert_eq!(
            stock_effect(OrderStatus::Shipped, OrderStatus::Delivered),
            StockEffect::None
        );
        assert_eq!(
            stock_effect(OrderStatus::Pending, OrderStatus::Cancelled),
            StockEffect::None
        );
        assert_eq!(
            stock_effect(OrderStatus::Pending, OrderStatus::Pending),
            StockEffect::None
        );
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Processing).unwrap(),
            "\"processing\""
        );
        let status: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_serde_rejects_unknown_status() {
        assert!(serde_json::from_str::<OrderStatus>("\"refunded\"").is_err());
        assert!(serde_json::from_str::<OrderStatus>("\"Pending\"").is_err());
    }

    #[test]
    fn test_from_str_roundtrip() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
    }
}
