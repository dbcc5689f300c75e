//! HTTP route definitions.
//!
//! Every handler returns the `{ok: true, ...}` envelope on success; errors
//! go through [`crate::error::AppError`] and render as `{ok: false, error}`.

pub mod account;
pub mod auth;
pub mod books;
pub mod cart;
pub mod orders;
pub mod reviews;
pub mod wishlist;

use axum::Router;

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/books", books::routes())
        .nest("/api/auth", auth::routes())
        .nest("/api/cart", cart::routes())
        .nest("/api/orders", orders::routes())
        .nest("/api/wishlist", wishlist::routes())
        .nest("/api/reviews", reviews::routes())
        .nest("/api/account", account::routes())
}
