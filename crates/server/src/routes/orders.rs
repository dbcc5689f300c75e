//! Order routes. All require a bearer token.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bookbuddy_core::{OrderId, OrderNumber, OrderStatus};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{Order, OrderItem, ShippingAddress};
use crate::services::orders::{DEFAULT_PAYMENT_METHOD, OrderService, StatusChange};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{order_number}", get(get_order).patch(update_status))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderRequest {
    items: Option<Vec<OrderItem>>,
    shipping_address: Option<ShippingAddress>,
    total: Option<Decimal>,
    payment_method: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderResponse {
    ok: bool,
    order_id: OrderId,
    order_number: OrderNumber,
}

/// `POST /api/orders` - checkout.
async fn create_order(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>)> {
    let items = body.items.unwrap_or_default();
    if items.is_empty() {
        return Err(AppError::BadRequest(
            "Order items are required".to_string(),
        ));
    }

    let shipping = body
        .shipping_address
        .filter(ShippingAddress::is_complete)
        .ok_or_else(|| {
            AppError::BadRequest(
                "Shipping address requires fullName, phone and street".to_string(),
            )
        })?;

    // Checkout posts the cart total; fall back to summing the lines.
    let total = body.total.unwrap_or_else(|| {
        items
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum()
    });

    let payment_method = body
        .payment_method
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());

    let order = OrderService::new(state.pool())
        .place(user.id, items, shipping, total, payment_method)
        .await?;

    tracing::info!(order_number = %order.order_number, "order placed");

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            ok: true,
            order_id: order.id,
            order_number: order.order_number,
        }),
    ))
}

#[derive(Debug, Serialize)]
struct ListOrdersResponse {
    ok: bool,
    orders: Vec<Order>,
}

/// `GET /api/orders` - the user's orders, newest first.
async fn list_orders(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<ListOrdersResponse>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(ListOrdersResponse { ok: true, orders }))
}

#[derive(Debug, Serialize)]
struct OrderResponse {
    ok: bool,
    order: Order,
}

/// `GET /api/orders/{order_number}` - scoped to the authenticated user.
async fn get_order(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(order_number): Path<String>,
) -> Result<Json<OrderResponse>> {
    let order = OrderRepository::new(state.pool())
        .get_for_user(user.id, &order_number)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    Ok(Json(OrderResponse { ok: true, order }))
}

#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    status: Option<String>,
}

#[derive(Debug, Serialize)]
struct UpdateStatusResponse {
    ok: bool,
    #[serde(flatten)]
    change: StatusChange,
}

/// `PATCH /api/orders/{order_number}` - move the order through its
/// lifecycle. The status string is validated before anything mutates.
async fn update_status(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(order_number): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>> {
    let next: OrderStatus = body
        .status
        .as_deref()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            AppError::BadRequest(
                "status must be one of pending, processing, shipped, delivered, cancelled"
                    .to_string(),
            )
        })?;

    let change = OrderService::new(state.pool())
        .change_status(user.id, &order_number, next)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    tracing::info!(
        order_number = %order_number,
        status = %change.status,
        previous = %change.previous_status,
        inventory_updated = change.inventory_updated,
        "order status changed"
    );

    Ok(Json(UpdateStatusResponse { ok: true, change }))
}
