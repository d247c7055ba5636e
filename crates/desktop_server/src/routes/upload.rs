use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use log::info;
use platform_host::UploadResponse;

use super::blocking;
use crate::{
    error::{ApiError, ApiResult},
    AppState,
};

pub(super) async fn store(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    body: Bytes,
) -> ApiResult<Json<UploadResponse>> {
    if body.is_empty() {
        return Err(ApiError::Validation("upload body is empty".into()));
    }
    let size = body.len();
    let url = blocking({
        let filename = filename.clone();
        move || Ok(state.blobs.put(&filename, &body)?)
    })
    .await?;
    info!("stored upload {filename} ({size} bytes) at {url}");
    Ok(Json(UploadResponse { url }))
}
