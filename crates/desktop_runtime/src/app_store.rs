//! Client-side mirror of the persisted application entries.
//!
//! [`AppStore`] is a pure container: [`AppStore::begin`] applies an optimistic edit, snapshots
//! the previous list and returns the requests that persist it. The caller later settles the edit
//! with [`AppStore::commit`] or [`AppStore::rollback`]. Network orchestration lives in
//! [`crate::sync`].

use std::collections::BTreeMap;

use platform_host::{AppIcon, AppPatch, AppRecord, NewAppRequest};
use thiserror::Error;

use crate::{
    grid::{GridLayout, GridPosition},
    model::OpenWindowRequest,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Application entry as rendered on the desktop.
pub struct AppEntry {
    pub id: String,
    pub name: String,
    pub icon: AppIcon,
    pub launch_url: String,
    pub grid_position: GridPosition,
}

impl From<AppRecord> for AppEntry {
    fn from(record: AppRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            icon: record.icon,
            launch_url: record.launch_url,
            grid_position: GridPosition::new(record.grid_row, record.grid_col),
        }
    }
}

impl AppEntry {
    pub fn open_request(&self) -> OpenWindowRequest {
        OpenWindowRequest::new(&self.id, &self.name, &self.launch_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Editable subset of an entry. `None` fields are left untouched.
pub struct AppFields {
    pub name: Option<String>,
    pub launch_url: Option<String>,
    pub icon: Option<AppIcon>,
}

impl AppFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.launch_url.is_none() && self.icon.is_none()
    }

    fn apply_to(&self, entry: &mut AppEntry) {
        if let Some(name) = &self.name {
            entry.name = name.clone();
        }
        if let Some(launch_url) = &self.launch_url {
            entry.launch_url = launch_url.clone();
        }
        if let Some(icon) = &self.icon {
            entry.icon = icon.clone();
        }
    }

    fn to_patch(&self) -> AppPatch {
        AppPatch {
            name: self.name.clone(),
            launch_url: self.launch_url.clone(),
            icon: self.icon.clone(),
            ..AppPatch::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Optimistic edit accepted by [`AppStore::begin`].
pub enum AppEdit {
    /// Drop `app_id` on `position`, swapping with the current occupant if any.
    Move {
        app_id: String,
        position: GridPosition,
    },
    /// Merge editable fields into `app_id`.
    Update { app_id: String, fields: AppFields },
    /// Remove `app_id`.
    Delete { app_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Remote call persisting part of an edit. Issued in order, stopping at the first failure.
pub enum AppRequest {
    Patch { id: String, patch: AppPatch },
    Delete { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EditId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
/// Handle of an applied, not yet settled edit.
pub struct PendingAppEdit {
    pub id: EditId,
    pub requests: Vec<AppRequest>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppStoreError {
    #[error("app {0} not found")]
    AppNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppStore {
    apps: Vec<AppEntry>,
    snapshots: BTreeMap<EditId, Vec<AppEntry>>,
    next_edit_id: u64,
}

impl AppStore {
    pub fn apps(&self) -> &[AppEntry] {
        &self.apps
    }

    pub fn app(&self, app_id: &str) -> Option<&AppEntry> {
        self.apps.iter().find(|app| app.id == app_id)
    }

    pub fn app_at(&self, position: GridPosition) -> Option<&AppEntry> {
        self.apps.iter().find(|app| app.grid_position == position)
    }

    /// Number of edits still waiting for their requests to settle.
    pub fn pending_edits(&self) -> usize {
        self.snapshots.len()
    }

    /// Replaces the list with freshly fetched records.
    pub fn replace_all(&mut self, records: Vec<AppRecord>) {
        self.apps = records.into_iter().map(AppEntry::from).collect();
    }

    /// Cell for a new app: first column of the row below the lowest occupied row. When that row
    /// is past the layout's last row, the first free cell (column by column) is used instead,
    /// and the last cell when the grid is full.
    pub fn next_grid_position(&self, layout: &GridLayout) -> GridPosition {
        let max_row = self
            .apps
            .iter()
            .map(|app| app.grid_position.row)
            .max()
            .unwrap_or(0);
        let below = GridPosition::new(max_row.saturating_add(1), 1);
        let (max_cols, max_rows) = layout.bounds();
        let Some(rows) = max_rows.filter(|&rows| below.row > rows) else {
            return below;
        };

        let cols = max_cols.unwrap_or_else(|| {
            self.apps
                .iter()
                .map(|app| app.grid_position.col)
                .max()
                .unwrap_or(0)
                .saturating_add(1)
        });
        (1..=cols)
            .flat_map(|col| (1..=rows).map(move |row| GridPosition::new(row, col)))
            .find(|&cell| self.app_at(cell).is_none())
            .unwrap_or_else(|| layout.clamp(GridPosition::new(rows, cols)))
    }

    /// Create request placing the new app at [`Self::next_grid_position`].
    pub fn new_app_request(
        &self,
        layout: &GridLayout,
        name: &str,
        launch_url: &str,
        icon: AppIcon,
    ) -> NewAppRequest {
        let position = self.next_grid_position(layout);
        NewAppRequest::new(name, launch_url, icon, position.row, position.col)
    }

    /// Inserts (or replaces) the record the server returned for a create.
    pub fn insert_created(&mut self, record: AppRecord) {
        let entry = AppEntry::from(record);
        match self.apps.iter_mut().find(|app| app.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.apps.push(entry),
        }
    }

    /// Applies `edit` locally and returns the requests that persist it.
    ///
    /// # Errors
    ///
    /// Returns [`AppStoreError::AppNotFound`] (without touching the list) when the edit targets
    /// an unknown app.
    pub fn begin(&mut self, edit: AppEdit) -> Result<PendingAppEdit, AppStoreError> {
        let snapshot = self.apps.clone();
        let requests = match edit {
            AppEdit::Move { app_id, position } => self.apply_move(&app_id, position)?,
            AppEdit::Update { app_id, fields } => {
                let entry = self.entry_mut(&app_id)?;
                fields.apply_to(entry);
                vec![AppRequest::Patch {
                    id: app_id,
                    patch: fields.to_patch(),
                }]
            }
            AppEdit::Delete { app_id } => {
                self.entry_mut(&app_id)?;
                self.apps.retain(|app| app.id != app_id);
                vec![AppRequest::Delete { id: app_id }]
            }
        };

        let id = EditId(self.next_edit_id);
        self.next_edit_id += 1;
        self.snapshots.insert(id, snapshot);
        Ok(PendingAppEdit { id, requests })
    }

    /// Forgets the snapshot of a successfully persisted edit.
    pub fn commit(&mut self, id: EditId) {
        self.snapshots.remove(&id);
    }

    /// Restores the list captured when the edit began. Returns `false` for a settled edit.
    pub fn rollback(&mut self, id: EditId) -> bool {
        match self.snapshots.remove(&id) {
            Some(snapshot) => {
                self.apps = snapshot;
                true
            }
            None => false,
        }
    }

    fn apply_move(
        &mut self,
        app_id: &str,
        position: GridPosition,
    ) -> Result<Vec<AppRequest>, AppStoreError> {
        let origin = self.entry_mut(app_id)?.grid_position;
        let displaced = self
            .app_at(position)
            .filter(|occupant| occupant.id != app_id)
            .map(|occupant| occupant.id.clone());

        self.entry_mut(app_id)?.grid_position = position;
        let mut requests = vec![AppRequest::Patch {
            id: app_id.to_string(),
            patch: AppPatch::position(position.row, position.col),
        }];

        if let Some(displaced_id) = displaced {
            self.entry_mut(&displaced_id)?.grid_position = origin;
            requests.push(AppRequest::Patch {
                id: displaced_id,
                patch: AppPatch::position(origin.row, origin.col),
            });
        }
        Ok(requests)
    }

    fn entry_mut(&mut self, app_id: &str) -> Result<&mut AppEntry, AppStoreError> {
        self.apps
            .iter_mut()
            .find(|app| app.id == app_id)
            .ok_or_else(|| AppStoreError::AppNotFound(app_id.to_string()))
    }
}
