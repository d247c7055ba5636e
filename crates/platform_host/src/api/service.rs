//! Host service trait for the desktop persistence API.

use std::{future::Future, pin::Pin};

use crate::{
    AccountRow, ApiError, AppPatch, AppRecord, ConfigMap, ConfigRecord, NewAppRequest,
};

/// Object-safe boxed future used by [`DesktopApi`] async methods.
pub type DesktopApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Client-side view of the backend routes.
///
/// Implementations issue exactly one request per call and never retry.
pub trait DesktopApi {
    /// `GET /apps`: all app records in creation order.
    fn list_apps(&self) -> DesktopApiFuture<'_, Result<Vec<AppRecord>, ApiError>>;

    /// `POST /apps`: creates an app and returns the stored record.
    fn create_app<'a>(
        &'a self,
        request: &'a NewAppRequest,
    ) -> DesktopApiFuture<'a, Result<AppRecord, ApiError>>;

    /// `PATCH /apps/{id}`: applies a partial update.
    fn patch_app<'a>(
        &'a self,
        id: &'a str,
        patch: &'a AppPatch,
    ) -> DesktopApiFuture<'a, Result<AppRecord, ApiError>>;

    /// `DELETE /apps/{id}`.
    fn delete_app<'a>(&'a self, id: &'a str) -> DesktopApiFuture<'a, Result<(), ApiError>>;

    /// `GET /configs`: every config entry except the reserved password key.
    fn list_configs(&self) -> DesktopApiFuture<'_, Result<ConfigMap, ApiError>>;

    /// `PATCH /configs`: upserts one entry.
    fn upsert_config<'a>(
        &'a self,
        id: &'a str,
        value: &'a str,
    ) -> DesktopApiFuture<'a, Result<ConfigRecord, ApiError>>;

    /// `POST /auth/verify`: checks a lock-screen password candidate.
    fn verify_password<'a>(
        &'a self,
        password: &'a str,
    ) -> DesktopApiFuture<'a, Result<bool, ApiError>>;

    /// `PUT /upload/{filename}`: stores an icon image and returns its public URL.
    fn upload_icon<'a>(
        &'a self,
        filename: &'a str,
        bytes: &'a [u8],
    ) -> DesktopApiFuture<'a, Result<String, ApiError>>;

    /// `GET /skt`: proxied account rows.
    fn list_accounts(&self) -> DesktopApiFuture<'_, Result<Vec<AccountRow>, ApiError>>;
}
