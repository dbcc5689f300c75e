//! Account management routes. All require a bearer token.

use axum::extract::State;
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::users::AccountDeletion;
use crate::error::{AppError, Result, clear_sentry_user};
use crate::middleware::RequireUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/update-password", post(update_password))
        .route("/delete", delete(delete_account))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePasswordRequest {
    new_password: Option<String>,
}

#[derive(Debug, Serialize)]
struct OkResponse {
    ok: bool,
}

/// `POST /api/account/update-password`.
async fn update_password(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<UpdatePasswordRequest>,
) -> Result<Json<OkResponse>> {
    let Some(new_password) = body.new_password.as_deref() else {
        return Err(AppError::BadRequest("newPassword is required".to_string()));
    };

    AuthService::new(state.pool(), state.config())
        .update_password(user.id, new_password)
        .await?;

    tracing::info!(user_id = %user.id, "password updated");

    Ok(Json(OkResponse { ok: true }))
}

#[derive(Debug, Serialize)]
struct DeleteAccountResponse {
    ok: bool,
    deleted: AccountDeletion,
}

/// `DELETE /api/account/delete` - removes the account and everything
/// attached to it, reporting per-table counts.
async fn delete_account(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<DeleteAccountResponse>> {
    let deleted = AuthService::new(state.pool(), state.config())
        .delete_account(user.id)
        .await?;

    clear_sentry_user();
    tracing::info!(user_id = %user.id, "account deleted");

    Ok(Json(DeleteAccountResponse { ok: true, deleted }))
}
