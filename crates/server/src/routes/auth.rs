//! Authentication routes.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use bookbuddy_core::{UserId, UserRole};

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/logout", post(logout))
}

/// Public view of an account in auth payloads.
#[derive(Debug, Serialize)]
struct UserPayload {
    id: UserId,
    email: String,
    name: String,
    role: UserRole,
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_owned(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct TokenResponse {
    ok: bool,
    token: String,
    user: UserPayload,
}

/// `POST /api/auth/register`.
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let (Some(email), Some(password)) = (body.email.as_deref(), body.password.as_deref()) else {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    let service = AuthService::new(state.pool(), state.config());
    let (user, token) = service.register(email, password, body.name.as_deref()).await?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            ok: true,
            token,
            user: UserPayload::from(&user),
        }),
    ))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

/// `POST /api/auth/login`.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let (Some(email), Some(password)) = (body.email.as_deref(), body.password.as_deref()) else {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    let service = AuthService::new(state.pool(), state.config());
    let (user, token) = service.login(email, password).await?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(TokenResponse {
        ok: true,
        token,
        user: UserPayload::from(&user),
    }))
}

#[derive(Debug, Serialize)]
struct MeResponse {
    ok: bool,
    authed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserPayload>,
}

/// `GET /api/auth/me`.
///
/// Never 401s: a missing or bad token answers `{ok: true, authed: false}` so
/// the client can render the anonymous state without special-casing errors.
async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<MeResponse>> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let user = match token {
        Some(token) => {
            AuthService::new(state.pool(), state.config())
                .current_user(token)
                .await?
        }
        None => None,
    };

    Ok(Json(MeResponse {
        ok: true,
        authed: user.is_some(),
        user: user.as_ref().map(UserPayload::from),
    }))
}

#[derive(Debug, Serialize)]
struct OkResponse {
    ok: bool,
}

/// `POST /api/auth/logout`.
///
/// Tokens are stateless; the client discards its copy. This only clears the
/// Sentry user scope.
async fn logout() -> Json<OkResponse> {
    clear_sentry_user();
    Json(OkResponse { ok: true })
}
