//! Optimistic synchronization between the client stores and the [`DesktopApi`].
//!
//! Each operation applies its edit locally first, issues the requests, then commits the edit or
//! restores the snapshot taken when it began. Requests run in order and stop at the first
//! failure. Nothing is retried.

use std::{cell::RefCell, rc::Rc};

use leptos::{RwSignal, SignalUpdate};
use platform_host::{ApiError, AppIcon, DesktopApi};
use thiserror::Error;

use crate::{
    app_store::{AppEdit, AppEntry, AppFields, AppRequest, AppStore, AppStoreError, PendingAppEdit},
    config_store::ConfigStore,
    grid::{GridLayout, GridPosition},
};

/// Mutable state slot the sync functions operate on.
///
/// Implemented for reactive signals (the running shell) and plain `RefCell`s (tests).
pub trait StateCell<T> {
    /// Runs `f` against the current value. Returns `None` when the slot is gone.
    fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
}

impl<T> StateCell<T> for RefCell<T> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<T> StateCell<T> for Rc<RefCell<T>> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<T: 'static> StateCell<T> for RwSignal<T> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.try_update(f)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] AppStoreError),
    #[error("desktop state was disposed")]
    Disposed,
}

fn with_state<T, R>(cell: &impl StateCell<T>, f: impl FnOnce(&mut T) -> R) -> Result<R, SyncError> {
    cell.with_mut(f).ok_or(SyncError::Disposed)
}

/// Replaces the app list with the server's records. Returns the number of apps.
pub async fn fetch_apps(
    api: &dyn DesktopApi,
    apps: &impl StateCell<AppStore>,
) -> Result<usize, SyncError> {
    let records = api.list_apps().await?;
    let count = records.len();
    with_state(apps, |store| store.replace_all(records))?;
    Ok(count)
}

/// Drops `app_id` on `position`, swapping with the occupant.
pub async fn update_app_position(
    api: &dyn DesktopApi,
    apps: &impl StateCell<AppStore>,
    app_id: &str,
    position: GridPosition,
) -> Result<(), SyncError> {
    apply_edit(
        api,
        apps,
        AppEdit::Move {
            app_id: app_id.to_string(),
            position,
        },
    )
    .await
}

/// Merges editable fields into `app_id` and persists them.
pub async fn update_app(
    api: &dyn DesktopApi,
    apps: &impl StateCell<AppStore>,
    app_id: &str,
    fields: AppFields,
) -> Result<(), SyncError> {
    if fields.is_empty() {
        return Ok(());
    }
    apply_edit(
        api,
        apps,
        AppEdit::Update {
            app_id: app_id.to_string(),
            fields,
        },
    )
    .await
}

/// Removes `app_id` locally and on the server.
pub async fn delete_app(
    api: &dyn DesktopApi,
    apps: &impl StateCell<AppStore>,
    app_id: &str,
) -> Result<(), SyncError> {
    apply_edit(
        api,
        apps,
        AppEdit::Delete {
            app_id: app_id.to_string(),
        },
    )
    .await
}

/// Creates an app below the lowest occupied row. The list only changes once the server has
/// assigned an id.
pub async fn add_app(
    api: &dyn DesktopApi,
    apps: &impl StateCell<AppStore>,
    layout: &GridLayout,
    name: &str,
    launch_url: &str,
    icon: AppIcon,
) -> Result<AppEntry, SyncError> {
    let request = with_state(apps, |store| store.new_app_request(layout, name, launch_url, icon))?;
    let record = api.create_app(&request).await?;
    let entry = AppEntry::from(record.clone());
    with_state(apps, |store| store.insert_created(record))?;
    Ok(entry)
}

async fn apply_edit(
    api: &dyn DesktopApi,
    apps: &impl StateCell<AppStore>,
    edit: AppEdit,
) -> Result<(), SyncError> {
    let pending = with_state(apps, |store| store.begin(edit))??;
    settle(api, apps, pending).await
}

async fn settle(
    api: &dyn DesktopApi,
    apps: &impl StateCell<AppStore>,
    pending: PendingAppEdit,
) -> Result<(), SyncError> {
    for request in &pending.requests {
        let result = match request {
            AppRequest::Patch { id, patch } => api.patch_app(id, patch).await.map(|_| ()),
            AppRequest::Delete { id } => api.delete_app(id).await,
        };
        if let Err(err) = result {
            apps.with_mut(|store| store.rollback(pending.id));
            return Err(err.into());
        }
    }
    with_state(apps, |store| store.commit(pending.id))
}

/// Replaces the config map with the server's entries.
pub async fn fetch_configs(
    api: &dyn DesktopApi,
    configs: &impl StateCell<ConfigStore>,
) -> Result<(), SyncError> {
    let map = api.list_configs().await?;
    with_state(configs, |store| store.replace_all(map))
}

/// Merges `key = value` locally, persists it and rolls back on failure.
pub async fn update_config(
    api: &dyn DesktopApi,
    configs: &impl StateCell<ConfigStore>,
    key: &str,
    value: &str,
) -> Result<(), SyncError> {
    let edit = with_state(configs, |store| store.begin_update(key, value))?;
    match api.upsert_config(key, value).await {
        Ok(_) => with_state(configs, |store| store.commit(edit)),
        Err(err) => {
            configs.with_mut(|store| store.rollback(edit));
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{ApiCall, AppPatch, MemoryDesktopApi, WALLPAPER_KEY};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::app_store::tests::record;

    fn loaded(api: &MemoryDesktopApi) -> RefCell<AppStore> {
        let apps = RefCell::new(AppStore::default());
        block_on(fetch_apps(api, &apps)).expect("fetch apps");
        apps
    }

    fn positions(apps: &RefCell<AppStore>) -> Vec<(String, u32, u32)> {
        apps.borrow()
            .apps()
            .iter()
            .map(|a| (a.id.clone(), a.grid_position.row, a.grid_position.col))
            .collect()
    }

    #[test]
    fn swap_persists_dragged_app_first() {
        let api = MemoryDesktopApi::with_apps(vec![record("g", 1, 1), record("v", 2, 1)]);
        let apps = loaded(&api);

        block_on(update_app_position(&api, &apps, "g", GridPosition::new(2, 1))).expect("swap");

        assert_eq!(
            positions(&apps),
            vec![("g".to_string(), 2, 1), ("v".to_string(), 1, 1)]
        );
        assert_eq!(
            api.calls()[1..].to_vec(),
            vec![
                ApiCall::PatchApp {
                    id: "g".to_string(),
                    patch: AppPatch::position(2, 1),
                },
                ApiCall::PatchApp {
                    id: "v".to_string(),
                    patch: AppPatch::position(1, 1),
                },
            ]
        );
        assert_eq!(apps.borrow().pending_edits(), 0);
    }

    #[test]
    fn failed_swap_restores_the_pre_drag_list() {
        let api = MemoryDesktopApi::with_apps(vec![record("g", 1, 1), record("v", 2, 1)]);
        let apps = loaded(&api);
        let before = positions(&apps);

        // first patch succeeds, second fails
        api.fail_after(1);
        let err = block_on(update_app_position(&api, &apps, "g", GridPosition::new(2, 1)))
            .expect_err("second patch fails");

        assert!(matches!(err, SyncError::Api(ApiError::Transport(_))));
        assert_eq!(positions(&apps), before);
        assert_eq!(apps.borrow().pending_edits(), 0);
    }

    #[test]
    fn unknown_app_issues_no_request() {
        let api = MemoryDesktopApi::with_apps(vec![record("g", 1, 1)]);
        let apps = loaded(&api);

        let err = block_on(update_app_position(&api, &apps, "nope", GridPosition::new(3, 3)))
            .expect_err("unknown app");
        assert_eq!(
            err,
            SyncError::Store(AppStoreError::AppNotFound("nope".to_string()))
        );
        assert_eq!(api.calls(), vec![ApiCall::ListApps]);
    }

    #[test]
    fn add_app_inserts_server_record() {
        let api = MemoryDesktopApi::with_apps(vec![record("g", 1, 1), record("v", 2, 1)]);
        let apps = loaded(&api);

        let entry = block_on(add_app(
            &api,
            &apps,
            &GridLayout::default(),
            "Docs",
            "https://docs.test",
            AppIcon::parse("monitor"),
        ))
        .expect("add app");

        assert_eq!(entry.id, "app-1");
        assert_eq!(entry.grid_position, GridPosition::new(3, 1));
        assert_eq!(apps.borrow().apps().len(), 3);
    }

    #[test]
    fn failed_add_leaves_list_unchanged() {
        let api = MemoryDesktopApi::with_apps(vec![record("g", 1, 1)]);
        let apps = loaded(&api);
        api.set_offline(true);

        block_on(add_app(
            &api,
            &apps,
            &GridLayout::default(),
            "Docs",
            "https://docs.test",
            AppIcon::parse("monitor"),
        ))
        .expect_err("offline");
        assert_eq!(apps.borrow().apps().len(), 1);
    }

    #[test]
    fn failed_delete_and_update_roll_back() {
        let api = MemoryDesktopApi::with_apps(vec![record("g", 1, 1)]);
        let apps = loaded(&api);
        let before = apps.borrow().apps().to_vec();
        api.set_offline(true);

        block_on(delete_app(&api, &apps, "g")).expect_err("delete fails");
        assert_eq!(apps.borrow().apps(), before.as_slice());
        assert_eq!(apps.borrow().pending_edits(), 0);

        let fields = AppFields {
            name: Some("Renamed".to_string()),
            ..AppFields::default()
        };
        block_on(update_app(&api, &apps, "g", fields)).expect_err("update fails");
        assert_eq!(apps.borrow().apps(), before.as_slice());
        assert_eq!(apps.borrow().pending_edits(), 0);
    }

    #[test]
    fn delete_removes_locally_and_remotely() {
        let api = MemoryDesktopApi::with_apps(vec![record("g", 1, 1), record("v", 2, 1)]);
        let apps = loaded(&api);

        block_on(delete_app(&api, &apps, "g")).expect("delete");
        assert_eq!(positions(&apps), vec![("v".to_string(), 2, 1)]);
        assert_eq!(api.apps().len(), 1);
    }

    #[test]
    fn config_update_rolls_back_on_failure() {
        let api = MemoryDesktopApi::default();
        api.set_config(WALLPAPER_KEY, "https://img.test/a.jpg");
        let configs = RefCell::new(ConfigStore::default());
        block_on(fetch_configs(&api, &configs)).expect("fetch configs");

        block_on(update_config(&api, &configs, WALLPAPER_KEY, "https://img.test/b.jpg"))
            .expect("update");
        assert_eq!(configs.borrow().wallpaper(), Some("https://img.test/b.jpg"));

        api.set_offline(true);
        block_on(update_config(&api, &configs, WALLPAPER_KEY, "https://img.test/c.jpg"))
            .expect_err("offline");
        assert_eq!(configs.borrow().wallpaper(), Some("https://img.test/b.jpg"));
    }
}
