//! Route error type and its HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use platform_host::ErrorBody;
use thiserror::Error;

use crate::{blob::BlobError, notion::UpstreamError, store::StoreError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Proxied service failed; message and code are passed through.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// Required server configuration is absent.
    #[error("{0}")]
    Misconfigured(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Blob(#[from] BlobError),
    /// Blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Blob(BlobError::InvalidName(_)) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_)
            | Self::Misconfigured(_)
            | Self::Store(_)
            | Self::Blob(_)
            | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Validation(message) | Self::NotFound(message) => ErrorBody {
                error: message.clone(),
                details: None,
            },
            Self::Blob(BlobError::InvalidName(_)) => ErrorBody {
                error: self.to_string(),
                details: None,
            },
            Self::Upstream(err) => ErrorBody {
                error: err.message.clone(),
                details: err.code.clone(),
            },
            Self::Misconfigured(message) => ErrorBody {
                error: (*message).to_string(),
                details: None,
            },
            Self::Store(_) | Self::Blob(_) | Self::Task(_) => ErrorBody {
                error: "Internal Server Error".to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {self}");
        }
        (status, Json(self.body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
