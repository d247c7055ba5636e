use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use platform_host::{ConfigMap, ConfigPatchRequest, ConfigRecord, LOCK_PASSWORD_KEY};

use super::blocking;
use crate::{
    error::{ApiError, ApiResult},
    AppState,
};

/// Every entry except the lock password hash.
pub(super) async fn list(State(state): State<AppState>) -> ApiResult<Json<ConfigMap>> {
    let mut configs = blocking(move || Ok(state.repo.configs()?)).await?;
    configs.remove(LOCK_PASSWORD_KEY);
    Ok(Json(configs))
}

pub(super) async fn upsert(
    State(state): State<AppState>,
    payload: Result<Json<ConfigPatchRequest>, JsonRejection>,
) -> ApiResult<Json<ConfigRecord>> {
    let Json(request) = payload?;
    let id = request
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("id is required".into()))?;
    if id == LOCK_PASSWORD_KEY {
        return Err(ApiError::Validation(format!(
            "{LOCK_PASSWORD_KEY} can only be set with the seed command"
        )));
    }
    let value = request
        .value
        .ok_or_else(|| ApiError::Validation("value is required".into()))?;
    blocking(move || Ok(state.repo.upsert_config(&id, &value)?))
        .await
        .map(Json)
}
