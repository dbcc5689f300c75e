//! Order repository.

use bookbuddy_core::{OrderNumber, OrderStatus, UserId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use super::{RepositoryError, conflict_on_unique};
use crate::models::{Order, OrderItem, ShippingAddress};

const ORDER_COLUMNS: &str = "id, order_number, user_id, items, shipping_address, \
                             total, payment_method, status, created_at, updated_at";

/// Fields of a new order, validated by the order service.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: OrderNumber,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub total: Decimal,
    pub payment_method: String,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count all orders. Feeds the order-number sequence.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Insert a new order with status `pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order number collides.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user_id: UserId, order: NewOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders \
                 (order_number, user_id, items, shipping_address, total, payment_method, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(&order.order_number)
        .bind(user_id)
        .bind(Json(&order.items))
        .bind(Json(&order.shipping_address))
        .bind(order.total)
        .bind(&order.payment_method)
        .bind(OrderStatus::Pending)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "order number already exists"))?;

        Ok(row)
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE user_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Get one of the user's orders by order number.
    ///
    /// Scoped to the user; another user's order number behaves like a
    /// missing one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        order_number: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE user_id = $1 AND order_number = $2"
        ))
        .bind(user_id)
        .bind(order_number)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Set an order's status, scoped to the owning user.
    ///
    /// Returns the number of rows modified (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_status(
        &self,
        user_id: UserId,
        order_number: &str,
        status: OrderStatus,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE orders SET status = $3, updated_at = now() \
             WHERE user_id = $1 AND order_number = $2",
        )
        .bind(user_id)
        .bind(order_number)
        .bind(status)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
