//! Order placement and status transitions.
//!
//! Status transitions drive inventory: entering the reducing class
//! (processing/shipped/delivered) deducts each line's quantity from its
//! book, leaving it restores them, and moves within a class touch nothing.
//! The per-line adjustments and the status write are separate statements,
//! not one transaction; concurrent transitions on the same order can
//! double-adjust.

use bookbuddy_core::{OrderNumber, OrderStatus, StockEffect, UserId, stock_effect};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::db::RepositoryError;
use crate::db::books::BookRepository;
use crate::db::orders::{NewOrder, OrderRepository};
use crate::models::{Order, OrderItem, ShippingAddress};

/// Default payment method when checkout doesn't specify one.
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash on Delivery";

/// Outcome of a status transition.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: OrderStatus,
    pub previous_status: OrderStatus,
    /// Whether the transition crossed the reducing boundary and adjusted
    /// book quantities.
    pub inventory_updated: bool,
}

/// Service for placing orders and moving them through their lifecycle.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
    books: BookRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            books: BookRepository::new(pool),
        }
    }

    /// Place a new order with status `pending`.
    ///
    /// The order number is `BB-YYYYMMDD-NNNN` with the sequence taken from
    /// the current row count plus one. Concurrent checkouts can race to the
    /// same sequence; the unique index turns that into a conflict instead of
    /// a duplicate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on an order-number collision.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn place(
        &self,
        user_id: UserId,
        items: Vec<OrderItem>,
        shipping_address: ShippingAddress,
        total: Decimal,
        payment_method: String,
    ) -> Result<Order, RepositoryError> {
        let sequence = self.orders.count().await?.unsigned_abs() + 1;
        let order_number = OrderNumber::new(Utc::now().date_naive(), sequence);

        self.orders
            .create(
                user_id,
                NewOrder {
                    order_number,
                    items,
                    shipping_address,
                    total,
                    payment_method,
                },
            )
            .await
    }

    /// Move one of the user's orders to a new status, adjusting inventory
    /// when the transition crosses the reducing boundary.
    ///
    /// Returns `None` when the order doesn't exist for this user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails. A failure
    /// partway through leaves already-adjusted books adjusted.
    pub async fn change_status(
        &self,
        user_id: UserId,
        order_number: &str,
        next: OrderStatus,
    ) -> Result<Option<StatusChange>, RepositoryError> {
        let Some(order) = self.orders.get_for_user(user_id, order_number).await? else {
            return Ok(None);
        };

        let effect = stock_effect(order.status, next);
        let inventory_updated = match effect {
            StockEffect::None => false,
            StockEffect::Deduct | StockEffect::Restore => {
                self.adjust_inventory(&order.items.0, effect).await?;
                true
            }
        };

        let modified = self.orders.set_status(user_id, order_number, next).await?;
        if modified == 0 {
            // Order vanished between the read and the write
            return Ok(None);
        }

        Ok(Some(StatusChange {
            status: next,
            previous_status: order.status,
            inventory_updated,
        }))
    }

    /// Apply a stock effect to every line of an order.
    ///
    /// Read-then-write per book; deductions floor at zero. Lines whose book
    /// no longer exists are skipped.
    async fn adjust_inventory(
        &self,
        items: &[OrderItem],
        effect: StockEffect,
    ) -> Result<(), RepositoryError> {
        for item in items {
            let Some(current) = self.books.quantity(item.book_id).await? else {
                continue;
            };

            let updated = match effect {
                StockEffect::Deduct => (current - item.quantity).max(0),
                StockEffect::Restore => current + item.quantity,
                StockEffect::None => current,
            };

            self.books.set_quantity(item.book_id, updated).await?;
        }

        Ok(())
    }
}
