//! Review routes. Listing is public; writes require a bearer token.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use bookbuddy_core::{BookId, ReviewId};

use crate::db::{BookRepository, ReviewRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::review::RATING_RANGE;
use crate::models::{Review, ReviewWithAuthor};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{review_id}",
            patch(update_review).delete(delete_review),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    book_id: Option<BookId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    ok: bool,
    reviews: Vec<ReviewWithAuthor>,
    average_rating: f64,
    total_reviews: usize,
}

/// `GET /api/reviews?bookId=` - public listing with aggregates.
async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let Some(book_id) = params.book_id else {
        return Err(AppError::BadRequest("bookId is required".to_string()));
    };

    let mut reviews = ReviewRepository::new(state.pool())
        .list_for_book(book_id)
        .await?;

    // Deleted reviewers show up as anonymous
    for review in &mut reviews {
        if review.author_name.is_none() {
            review.author_name = Some("Anonymous".to_string());
        }
    }

    let total_reviews = reviews.len();
    let average_rating = if total_reviews == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let sum: f64 = reviews.iter().map(|r| f64::from(r.rating)).sum();
        #[allow(clippy::cast_precision_loss)]
        let avg = sum / total_reviews as f64;
        // One decimal place
        (avg * 10.0).round() / 10.0
    };

    Ok(Json(ListResponse {
        ok: true,
        reviews,
        average_rating,
        total_reviews,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateReviewRequest {
    book_id: Option<BookId>,
    rating: Option<i32>,
    comment: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateReviewResponse {
    ok: bool,
    review: Review,
}

fn validate_rating(rating: Option<i32>) -> Result<i32> {
    rating.filter(|r| RATING_RANGE.contains(r)).ok_or_else(|| {
        AppError::BadRequest("rating must be an integer between 1 and 5".to_string())
    })
}

/// `POST /api/reviews` - one review per (book, user); duplicates conflict.
async fn create_review(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<CreateReviewResponse>)> {
    let Some(book_id) = body.book_id else {
        return Err(AppError::BadRequest("bookId is required".to_string()));
    };
    let rating = validate_rating(body.rating)?;

    BookRepository::new(state.pool())
        .get(book_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

    let review = ReviewRepository::new(state.pool())
        .create(user.id, book_id, rating, body.comment.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReviewResponse { ok: true, review }),
    ))
}

#[derive(Debug, Deserialize)]
struct UpdateReviewRequest {
    rating: Option<i32>,
    comment: Option<String>,
}

#[derive(Debug, Serialize)]
struct OkResponse {
    ok: bool,
}

/// `PATCH /api/reviews/{review_id}` - owner-scoped.
async fn update_review(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(review_id): Path<i32>,
    Json(body): Json<UpdateReviewRequest>,
) -> Result<Json<OkResponse>> {
    let rating = validate_rating(body.rating)?;

    let modified = ReviewRepository::new(state.pool())
        .update_own(
            user.id,
            ReviewId::new(review_id),
            rating,
            body.comment.as_deref(),
        )
        .await?;

    if modified == 0 {
        return Err(AppError::NotFound("Review not found".to_string()));
    }

    Ok(Json(OkResponse { ok: true }))
}

/// `DELETE /api/reviews/{review_id}` - owner-scoped.
async fn delete_review(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(review_id): Path<i32>,
) -> Result<Json<OkResponse>> {
    let deleted = ReviewRepository::new(state.pool())
        .delete_own(user.id, ReviewId::new(review_id))
        .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Review not found".to_string()));
    }

    Ok(Json(OkResponse { ok: true }))
}
