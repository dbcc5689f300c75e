//! Catalog routes.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use bookbuddy_core::{BookId, Price};

use crate::db::books::{BookRepository, CatalogFilter};
use crate::error::{AppError, Result};
use crate::models::{Book, BookListItem};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books))
        .route("/{id}", get(get_book).patch(patch_book).delete(delete_book))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    q: Option<String>,
    genre: Option<String>,
    limit: Option<i64>,
    skip: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    ok: bool,
    count: usize,
    items: Vec<BookListItem>,
}

/// `GET /api/books` - browse/search the catalog.
async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let filter = CatalogFilter {
        q: params.q,
        genre: params.genre,
        limit: params.limit,
        skip: params.skip,
    };

    let items = BookRepository::new(state.pool()).list(&filter).await?;

    Ok(Json(ListResponse {
        ok: true,
        count: items.len(),
        items,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookResponse {
    ok: bool,
    #[serde(flatten)]
    book: Book,
    /// Derived display price; not a stored column.
    price: Price,
}

/// `GET /api/books/{id}` - full book document with derived price.
async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BookResponse>> {
    let book = BookRepository::new(state.pool())
        .get(BookId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

    let price = book.list_price();
    Ok(Json(BookResponse {
        ok: true,
        book,
        price,
    }))
}

#[derive(Debug, Deserialize)]
struct PatchBookRequest {
    quantity: Option<i32>,
}

#[derive(Debug, Serialize)]
struct PatchBookResponse {
    ok: bool,
    modified: u64,
}

/// `PATCH /api/books/{id}` - maintenance path for stock corrections.
async fn patch_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<PatchBookRequest>,
) -> Result<Json<PatchBookResponse>> {
    let Some(quantity) = body.quantity else {
        return Err(AppError::BadRequest("quantity is required".to_string()));
    };
    if quantity < 0 {
        return Err(AppError::BadRequest(
            "quantity must not be negative".to_string(),
        ));
    }

    let modified = BookRepository::new(state.pool())
        .set_quantity(BookId::new(id), quantity)
        .await?;

    if modified == 0 {
        return Err(AppError::NotFound("Book not found".to_string()));
    }

    Ok(Json(PatchBookResponse { ok: true, modified }))
}

#[derive(Debug, Serialize)]
struct DeleteBookResponse {
    ok: bool,
    deleted: u64,
}

/// `DELETE /api/books/{id}`.
async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteBookResponse>> {
    let deleted = BookRepository::new(state.pool())
        .delete(BookId::new(id))
        .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Book not found".to_string()));
    }

    Ok(Json(DeleteBookResponse { ok: true, deleted }))
}
