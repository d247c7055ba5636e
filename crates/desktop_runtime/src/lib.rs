//! Desktop shell runtime: window store, app and config stores, and the Leptos UI that renders them.

pub mod app_store;
pub mod components;
pub mod config_store;
pub mod grid;
pub mod icons;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod sync;
pub mod window_manager;

pub use app_store::{AppEntry, AppFields, AppStore, AppStoreError};
pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config_store::ConfigStore;
pub use grid::{GridLayout, GridPosition};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError};
pub use sync::SyncError;
