use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use log::debug;
use platform_host::{VerifyPasswordRequest, VerifyPasswordResponse, LOCK_PASSWORD_KEY};

use super::blocking;
use crate::{auth::verify_password, error::ApiResult, AppState};

/// `{success}` for a candidate password. A missing or blank password is a 400 with
/// `success: false`; an unset stored password never matches.
pub(super) async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<VerifyPasswordRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<VerifyPasswordResponse>)> {
    let password = payload
        .ok()
        .and_then(|Json(request)| request.password)
        .filter(|password| !password.is_empty());
    let Some(password) = password else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(VerifyPasswordResponse { success: false }),
        ));
    };

    let success = blocking(move || {
        Ok(match state.repo.get_config(LOCK_PASSWORD_KEY)? {
            Some(stored) => verify_password(&password, &stored),
            None => {
                debug!("no {LOCK_PASSWORD_KEY} stored; rejecting");
                false
            }
        })
    })
    .await?;
    Ok((StatusCode::OK, Json(VerifyPasswordResponse { success })))
}
