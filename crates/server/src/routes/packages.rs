//! Package handlers. Every route requires auth and is scoped to the
//! authenticated client; other clients' packages are indistinguishable
//! from missing ones.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use parceldock_core::PackageId;

use crate::db::packages::PackageRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{NewPackage, Package, PackageChanges};
use crate::state::AppState;

/// Response body for `DELETE /packages/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// Response body for `DELETE /packages`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllResponse {
    pub deleted: u64,
}

/// Handle `POST /packages`.
///
/// Omitted fields stay empty; status defaults to `Saved`.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(client_id): RequireAuth,
    Json(body): Json<NewPackage>,
) -> Result<Json<Package>> {
    let repo = PackageRepository::new(state.pool());
    let package = repo.create(client_id, &body).await?;

    tracing::info!(client_id = %client_id, package_id = %package.id, "Package created");

    Ok(Json(package))
}

/// Handle `GET /packages`.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(client_id): RequireAuth,
) -> Result<Json<Vec<Package>>> {
    let repo = PackageRepository::new(state.pool());
    let packages = repo.list(client_id).await?;

    Ok(Json(packages))
}

/// Handle `GET /packages/{id}`.
pub async fn fetch(
    State(state): State<AppState>,
    RequireAuth(client_id): RequireAuth,
    Path(id): Path<PackageId>,
) -> Result<Json<Package>> {
    let repo = PackageRepository::new(state.pool());
    let package = repo
        .get(client_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

    Ok(Json(package))
}

/// Handle `PATCH /packages/{id}`.
///
/// An empty change set still has to prove the package exists, so it is
/// answered with the current state rather than an update.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(client_id): RequireAuth,
    Path(id): Path<PackageId>,
    Json(changes): Json<PackageChanges>,
) -> Result<Json<Package>> {
    let repo = PackageRepository::new(state.pool());

    let package = if changes.is_empty() {
        repo.get(client_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?
    } else {
        repo.update(client_id, id, &changes).await?
    };

    tracing::info!(client_id = %client_id, package_id = %package.id, "Package updated");

    Ok(Json(package))
}

/// Handle `DELETE /packages/{id}`.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(client_id): RequireAuth,
    Path(id): Path<PackageId>,
) -> Result<Json<DeleteResponse>> {
    let repo = PackageRepository::new(state.pool());
    let deleted = repo.delete(client_id, id).await?;

    if !deleted {
        return Err(AppError::NotFound("Package not found".to_string()));
    }

    tracing::info!(client_id = %client_id, package_id = %id, "Package deleted");

    Ok(Json(DeleteResponse { deleted }))
}

/// Handle `DELETE /packages`.
pub async fn delete_all(
    State(state): State<AppState>,
    RequireAuth(client_id): RequireAuth,
) -> Result<Json<DeleteAllResponse>> {
    let repo = PackageRepository::new(state.pool());
    let deleted = repo.delete_all(client_id).await?;

    tracing::info!(client_id = %client_id, deleted, "All packages deleted");

    Ok(Json(DeleteAllResponse { deleted }))
}
