//! `/api` route table.

mod apps;
mod auth;
mod configs;
mod skt;
mod upload;

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::{
    error::{ApiError, ApiResult},
    AppState,
};

/// Largest accepted icon upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Runs file I/O and password hashing on the blocking pool.
async fn blocking<T, F>(work: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> ApiResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| ApiError::Task(err.to_string()))?
}

/// Routes mounted under `/api`. Stored blobs are served from `blob_dir` under `/blobs` when given.
pub fn api_router(blob_dir: Option<&Path>) -> Router<AppState> {
    let router = Router::new()
        .route("/apps", get(apps::list).post(apps::create))
        .route("/apps/:id", patch(apps::update).delete(apps::remove))
        .route("/configs", get(configs::list).patch(configs::upsert))
        .route("/auth/verify", post(auth::verify))
        .route("/skt", get(skt::list))
        .route(
            "/upload/:filename",
            put(upload::store).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        );

    match blob_dir {
        Some(dir) => router.nest_service("/blobs", ServeDir::new(dir)),
        None => router,
    }
}
