//! Typed host-domain contracts shared by the desktop runtime, browser adapters, and the backend.
//!
//! This crate is the API-first boundary between the shell and its persistence service. It exposes
//! the JSON wire records exchanged with the backend routes, the [`AppIcon`] tagged variant, and the
//! [`DesktopApi`] service trait. Concrete browser transport lives in `platform_host_web`; the
//! server side of the same contract lives in `desktop_server`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod icon;

pub use api::error::ApiError;
pub use api::memory::{ApiCall, MemoryDesktopApi};
pub use api::service::{DesktopApi, DesktopApiFuture};
pub use api::types::{
    AccountRow, AppPatch, AppRecord, ConfigMap, ConfigPatchRequest, ConfigRecord,
    DeleteAppResponse, ErrorBody, NewAppRequest, UploadResponse, VerifyPasswordRequest,
    VerifyPasswordResponse, DEFAULT_GRID_COL, DEFAULT_GRID_ROW, LOCK_PASSWORD_KEY, WALLPAPER_KEY,
};
pub use icon::AppIcon;
