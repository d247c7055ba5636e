use axum::{extract::State, Json};
use log::info;
use platform_host::AccountRow;

use crate::{
    error::{ApiError, ApiResult},
    AppState,
};

pub(super) async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<AccountRow>>> {
    let source = state
        .accounts
        .as_ref()
        .ok_or(ApiError::Misconfigured("Notion configuration is missing"))?;
    let rows = source.fetch_accounts().await?;
    info!("accounts proxy returned {} rows", rows.len());
    Ok(Json(rows))
}
