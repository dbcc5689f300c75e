//! Bearer-token extractor.
//!
//! Handlers take [`RequireUser`] when authentication is mandatory. It
//! verifies the token signature and expiry only; it does not hit the
//! database.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use bookbuddy_core::UserId;

use crate::error::AppError;
use crate::services::auth::verify_token;
use crate::state::AppState;

/// Identity carried by a verified token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

/// Extractor that rejects unauthenticated requests with 401.
#[derive(Debug, Clone)]
pub struct RequireUser(pub AuthUser);

/// Pull the token out of an `Authorization: Bearer ...` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthUser, AppError> {
    let token = bearer_token(parts)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    let claims = verify_token(token, &state.config().auth_secret)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    Ok(AuthUser {
        id: UserId::new(claims.sub),
        email: claims.email,
        name: claims.name,
    })
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).map(Self)
    }
}
