//! Cart routes. All require a bearer token.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::CartItem;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_cart).post(save_cart).delete(clear_cart))
}

#[derive(Debug, Serialize)]
struct CartResponse {
    ok: bool,
    items: Vec<CartItem>,
}

/// `GET /api/cart` - the saved cart, or an empty one.
async fn get_cart(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CartResponse>> {
    let cart = CartRepository::new(state.pool()).get(user.id).await?;

    Ok(Json(CartResponse {
        ok: true,
        items: cart.map(|c| c.items.0).unwrap_or_default(),
    }))
}

#[derive(Debug, Deserialize)]
struct SaveCartRequest {
    items: Option<Vec<CartItem>>,
}

#[derive(Debug, Serialize)]
struct OkResponse {
    ok: bool,
}

/// `POST /api/cart` - wholesale replace. Last writer wins; no merging.
async fn save_cart(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<SaveCartRequest>,
) -> Result<Json<OkResponse>> {
    let Some(items) = body.items else {
        return Err(AppError::BadRequest("items must be an array".to_string()));
    };

    CartRepository::new(state.pool())
        .upsert(user.id, &items)
        .await?;

    Ok(Json(OkResponse { ok: true }))
}

#[derive(Debug, Serialize)]
struct ClearCartResponse {
    ok: bool,
    deleted: u64,
}

/// `DELETE /api/cart`.
async fn clear_cart(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<ClearCartResponse>> {
    let deleted = CartRepository::new(state.pool()).clear(user.id).await?;

    Ok(Json(ClearCartResponse { ok: true, deleted }))
}
