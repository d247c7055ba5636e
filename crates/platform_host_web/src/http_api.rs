//! `fetch`-backed [`DesktopApi`] implementation.

use platform_host::{
    AccountRow, ApiError, AppPatch, AppRecord, ConfigMap, ConfigPatchRequest, ConfigRecord,
    DeleteAppResponse, DesktopApi, DesktopApiFuture, ErrorBody, NewAppRequest, UploadResponse,
    VerifyPasswordRequest, VerifyPasswordResponse,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::transport::{self, HttpRequest, HttpResponse, Method, RequestBody};

/// Base path the backend routes are mounted under.
pub const DEFAULT_API_BASE: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Browser API client issuing one `fetch` per call against `{base_url}/...`.
pub struct HttpDesktopApi {
    base_url: String,
}

impl Default for HttpDesktopApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl HttpDesktopApi {
    /// Creates a client rooted at `base_url` (trailing slashes are ignored).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody<'_>,
    ) -> Result<HttpResponse, ApiError> {
        let url = self.url(path);
        transport::send(HttpRequest {
            method,
            url: &url,
            body,
        })
        .await
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody<'_>,
    ) -> Result<T, ApiError> {
        let response = self.request(method, path, body).await?;
        decode_response(&response)
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let json = encode_body(body)?;
        self.request_json(method, path, RequestBody::Json(&json))
            .await
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Decode(format!("encode request: {e}")))
}

pub(crate) fn decode_response<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(status_error(response));
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) fn status_error(response: &HttpResponse) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .map(|body| match body.details {
            Some(details) => format!("{} ({details})", body.error),
            None => body.error,
        })
        .filter(|message| !message.is_empty())
        .or_else(|| Some(response.status_text.clone()).filter(|text| !text.is_empty()))
        .unwrap_or_else(|| format!("HTTP {}", response.status));
    ApiError::Status {
        status: response.status,
        message,
    }
}

/// A rejected candidate comes back as `400 {success:false}`; that is an answer, not a failure.
pub(crate) fn decode_verify_response(response: &HttpResponse) -> Result<bool, ApiError> {
    if response.status == 400 {
        if let Ok(body) = serde_json::from_str::<VerifyPasswordResponse>(&response.body) {
            return Ok(body.success);
        }
    }
    decode_response::<VerifyPasswordResponse>(response).map(|body| body.success)
}

/// Guesses an upload content type from the file extension.
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

impl DesktopApi for HttpDesktopApi {
    fn list_apps(&self) -> DesktopApiFuture<'_, Result<Vec<AppRecord>, ApiError>> {
        Box::pin(async move {
            self.request_json(Method::Get, "/apps", RequestBody::Empty)
                .await
        })
    }

    fn create_app<'a>(
        &'a self,
        request: &'a NewAppRequest,
    ) -> DesktopApiFuture<'a, Result<AppRecord, ApiError>> {
        Box::pin(async move { self.send_json(Method::Post, "/apps", request).await })
    }

    fn patch_app<'a>(
        &'a self,
        id: &'a str,
        patch: &'a AppPatch,
    ) -> DesktopApiFuture<'a, Result<AppRecord, ApiError>> {
        Box::pin(async move {
            let path = format!("/apps/{}", transport::encode_segment(id));
            self.send_json(Method::Patch, &path, patch).await
        })
    }

    fn delete_app<'a>(&'a self, id: &'a str) -> DesktopApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let path = format!("/apps/{}", transport::encode_segment(id));
            let _: DeleteAppResponse = self
                .request_json(Method::Delete, &path, RequestBody::Empty)
                .await?;
            Ok(())
        })
    }

    fn list_configs(&self) -> DesktopApiFuture<'_, Result<ConfigMap, ApiError>> {
        Box::pin(async move {
            self.request_json(Method::Get, "/configs", RequestBody::Empty)
                .await
        })
    }

    fn upsert_config<'a>(
        &'a self,
        id: &'a str,
        value: &'a str,
    ) -> DesktopApiFuture<'a, Result<ConfigRecord, ApiError>> {
        Box::pin(async move {
            let body = ConfigPatchRequest {
                id: Some(id.to_string()),
                value: Some(value.to_string()),
            };
            self.send_json(Method::Patch, "/configs", &body).await
        })
    }

    fn verify_password<'a>(
        &'a self,
        password: &'a str,
    ) -> DesktopApiFuture<'a, Result<bool, ApiError>> {
        Box::pin(async move {
            let json = encode_body(&VerifyPasswordRequest {
                password: Some(password.to_string()),
            })?;
            let response = self
                .request(Method::Post, "/auth/verify", RequestBody::Json(&json))
                .await?;
            decode_verify_response(&response)
        })
    }

    fn upload_icon<'a>(
        &'a self,
        filename: &'a str,
        bytes: &'a [u8],
    ) -> DesktopApiFuture<'a, Result<String, ApiError>> {
        Box::pin(async move {
            let path = format!("/upload/{}", transport::encode_segment(filename));
            let body = RequestBody::Bytes {
                content_type: content_type_for(filename),
                bytes,
            };
            let response: UploadResponse = self.request_json(Method::Put, &path, body).await?;
            Ok(response.url)
        })
    }

    fn list_accounts(&self) -> DesktopApiFuture<'_, Result<Vec<AccountRow>, ApiError>> {
        Box::pin(async move {
            self.request_json(Method::Get, "/skt", RequestBody::Empty)
                .await
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            status_text: String::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let api = HttpDesktopApi::new("https://desk.test/api/");
        assert_eq!(api.base_url(), "https://desk.test/api");
        assert_eq!(api.url("/apps"), "https://desk.test/api/apps");
    }

    #[test]
    fn error_bodies_become_status_errors() {
        let err = decode_response::<ConfigMap>(&response(
            500,
            r#"{"error":"Failed to fetch data from Notion","details":"unauthorized"}"#,
        ))
        .expect_err("500 is an error");
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                message: "Failed to fetch data from Notion (unauthorized)".to_string(),
            }
        );

        let err = decode_response::<ConfigMap>(&response(404, "")).expect_err("404 is an error");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "server returned 404: HTTP 404");
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let err = decode_response::<Vec<AppRecord>>(&response(200, "{\"apps\":")).expect_err("bad json");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn rejected_password_is_not_an_error() {
        assert_eq!(
            decode_verify_response(&response(400, r#"{"success":false}"#)),
            Ok(false)
        );
        assert_eq!(
            decode_verify_response(&response(200, r#"{"success":true}"#)),
            Ok(true)
        );
        assert!(decode_verify_response(&response(502, "bad gateway")).is_err());
    }

    #[test]
    fn upload_content_type_follows_extension() {
        assert_eq!(content_type_for("logo.PNG"), "image/png");
        assert_eq!(content_type_for("photo.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("README"), "application/octet-stream");
    }

    #[test]
    fn non_wasm_transport_reports_unsupported() {
        let api = HttpDesktopApi::default();
        let err = block_on(api.list_apps()).expect_err("no fetch outside wasm32");
        assert!(matches!(err, ApiError::Transport(message) if message.contains("GET /api/apps")));
    }
}
