//! Account profile handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Client;
use crate::services::AuthService;
use crate::state::AppState;

/// Request body for `PATCH /account`. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response body for `DELETE /account`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountResponse {
    pub client: Client,
    pub packages_deleted: u64,
}

/// Handle `GET /account`.
pub async fn current(
    State(state): State<AppState>,
    RequireAuth(client_id): RequireAuth,
) -> Result<Json<Client>> {
    let auth = AuthService::new(state.pool());
    let client = auth.get_client(client_id).await?;

    Ok(Json(client))
}

/// Handle `PATCH /account`.
///
/// Partial update: a new email is re-validated, a new password is
/// re-validated and re-hashed. Returns the updated profile.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(client_id): RequireAuth,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<Json<Client>> {
    let auth = AuthService::new(state.pool());
    let client = auth
        .update_account(
            client_id,
            body.name.as_deref(),
            body.email.as_deref(),
            body.password.as_deref(),
        )
        .await?;

    tracing::info!(client_id = %client.id, "Account updated");

    Ok(Json(client))
}

/// Handle `DELETE /account`.
///
/// Deletes the account together with every package it owns, in one
/// transaction. Any outstanding token for the account stops resolving to
/// a client once the row is gone.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(client_id): RequireAuth,
) -> Result<Json<DeleteAccountResponse>> {
    let auth = AuthService::new(state.pool());
    let (client, packages_deleted) = auth.delete_account(client_id).await?;

    tracing::info!(
        client_id = %client.id,
        packages_deleted,
        "Account deleted"
    );

    Ok(Json(DeleteAccountResponse {
        client,
        packages_deleted,
    }))
}
