//! Wishlist routes. All require a bearer token.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use bookbuddy_core::{BookId, WishlistEntryId};

use crate::db::{BookRepository, WishlistRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::WishlistBook;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wishlist).post(add_to_wishlist))
        .route("/{book_id}", delete(remove_from_wishlist))
}

#[derive(Debug, Serialize)]
struct WishlistResponse {
    ok: bool,
    items: Vec<WishlistBook>,
}

/// `GET /api/wishlist` - entries joined with live book data.
async fn list_wishlist(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<WishlistResponse>> {
    let items = WishlistRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(WishlistResponse { ok: true, items }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddWishlistRequest {
    book_id: Option<BookId>,
}

#[derive(Debug, Serialize)]
struct AddWishlistResponse {
    ok: bool,
    id: WishlistEntryId,
}

/// `POST /api/wishlist`.
async fn add_to_wishlist(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<AddWishlistRequest>,
) -> Result<(StatusCode, Json<AddWishlistResponse>)> {
    let Some(book_id) = body.book_id else {
        return Err(AppError::BadRequest("bookId is required".to_string()));
    };

    // 404 for unknown books before touching the wishlist
    BookRepository::new(state.pool())
        .get(book_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

    let id = WishlistRepository::new(state.pool())
        .add(user.id, book_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddWishlistResponse { ok: true, id }),
    ))
}

#[derive(Debug, Serialize)]
struct OkResponse {
    ok: bool,
}

/// `DELETE /api/wishlist/{book_id}`.
async fn remove_from_wishlist(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(book_id): Path<i32>,
) -> Result<Json<OkResponse>> {
    let removed = WishlistRepository::new(state.pool())
        .remove(user.id, BookId::new(book_id))
        .await?;

    if removed == 0 {
        return Err(AppError::NotFound("Not in wishlist".to_string()));
    }

    Ok(Json(OkResponse { ok: true }))
}
