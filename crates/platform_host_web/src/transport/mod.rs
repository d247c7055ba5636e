//! `fetch` transport glue.
//!
//! Routes calls to the target-specific implementation while keeping one request/response shape
//! for [`crate::http_api`].

use platform_host::ApiError;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum RequestBody<'a> {
    Empty,
    Json(&'a str),
    Bytes {
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct HttpRequest<'a> {
    pub method: Method,
    pub url: &'a str,
    pub body: RequestBody<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub(crate) fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub(crate) async fn send(request: HttpRequest<'_>) -> Result<HttpResponse, ApiError> {
    imp::send(request).await
}

/// Percent-encodes one URL path segment.
pub(crate) fn encode_segment(segment: &str) -> String {
    imp::encode_segment(segment)
}
