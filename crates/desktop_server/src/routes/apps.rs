use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use log::{info, warn};
use platform_host::{AppPatch, AppRecord, DeleteAppResponse, NewAppRequest};

use super::blocking;
use crate::{
    error::{ApiError, ApiResult},
    store::NewApp,
    AppState,
};

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("app {id} not found"))
}

pub(super) async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<AppRecord>>> {
    blocking(move || Ok(state.repo.list_apps()?)).await.map(Json)
}

pub(super) async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewAppRequest>, JsonRejection>,
) -> ApiResult<Json<AppRecord>> {
    let Json(request) = payload?;
    let app = NewApp::from_request(request).map_err(|msg| ApiError::Validation(msg.into()))?;
    let record = blocking(move || Ok(state.repo.create_app(app)?)).await?;
    info!("created app {} ({})", record.name, record.id);
    Ok(Json(record))
}

pub(super) async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AppPatch>, JsonRejection>,
) -> ApiResult<Json<AppRecord>> {
    let Json(patch) = payload?;
    blocking(move || state.repo.update_app(&id, &patch)?.ok_or_else(|| not_found(&id)))
        .await
        .map(Json)
}

/// Deletes the row; an icon stored in the blob store is removed best-effort.
pub(super) async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAppResponse>> {
    blocking(move || {
        let removed = state.repo.delete_app(&id)?.ok_or_else(|| not_found(&id))?;
        if let Some(url) = removed.icon.remote_url().filter(|url| state.blobs.owns(url)) {
            if let Err(err) = state.blobs.delete(url) {
                warn!("failed to delete icon blob {url} of app {id}: {err}");
            }
        }
        info!("deleted app {} ({id})", removed.name);
        Ok(DeleteAppResponse { success: true })
    })
    .await
    .map(Json)
}
