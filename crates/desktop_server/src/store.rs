//! JSON document repository for apps and config entries.
//!
//! The whole document lives in memory behind a mutex. Every mutation rewrites the backing file
//! through a temporary sibling and a rename, so a crash never leaves a half-written document.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use platform_host::{
    AppPatch, AppRecord, ConfigMap, ConfigRecord, NewAppRequest, DEFAULT_GRID_COL,
    DEFAULT_GRID_ROW,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("repository lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    #[serde(default)]
    apps: Vec<AppRecord>,
    #[serde(default)]
    configs: ConfigMap,
}

/// Validated fields of a new app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApp {
    pub name: String,
    pub launch_url: String,
    pub icon: platform_host::AppIcon,
    pub grid_row: u32,
    pub grid_col: u32,
}

impl NewApp {
    /// Checks the required fields of a create request. Zero or missing grid values fall back to
    /// the defaults.
    pub fn from_request(request: NewAppRequest) -> Result<Self, &'static str> {
        let name = request
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or("name is required")?;
        let launch_url = request
            .launch_url
            .filter(|url| !url.trim().is_empty())
            .ok_or("launchUrl is required")?;
        let icon = request
            .icon
            .filter(|icon| !icon.is_empty())
            .ok_or("icon is required")?;
        Ok(Self {
            name,
            launch_url,
            icon,
            grid_row: request
                .grid_row
                .filter(|row| *row > 0)
                .unwrap_or(DEFAULT_GRID_ROW),
            grid_col: request
                .grid_col
                .filter(|col| *col > 0)
                .unwrap_or(DEFAULT_GRID_COL),
        })
    }
}

#[derive(Debug)]
pub struct Repository {
    path: Option<PathBuf>,
    document: Mutex<Document>,
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl Repository {
    /// Opens the document at `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let document = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Document::default(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Document::default(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        Ok(Self {
            path: Some(path),
            document: Mutex::new(document),
        })
    }

    /// Repository that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            document: Mutex::new(Document::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Document>, StoreError> {
        self.document.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Applies `mutate` to a copy of the document, persists it, then swaps it in.
    fn mutate<R>(&self, mutate: impl FnOnce(&mut Document) -> R) -> Result<R, StoreError> {
        let mut guard = self.lock()?;
        let mut next = guard.clone();
        let result = mutate(&mut next);
        if next != *guard {
            self.persist(&next)?;
            *guard = next;
        }
        Ok(result)
    }

    fn persist(&self, document: &Document) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let encoded = serde_json::to_vec_pretty(document)?;
        let write_err = |source| StoreError::Write {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, encoded).map_err(write_err)?;
        fs::rename(&tmp, path).map_err(write_err)
    }

    /// Apps in creation order.
    pub fn list_apps(&self) -> Result<Vec<AppRecord>, StoreError> {
        Ok(self.lock()?.apps.clone())
    }

    pub fn get_app(&self, id: &str) -> Result<Option<AppRecord>, StoreError> {
        Ok(self.lock()?.apps.iter().find(|app| app.id == id).cloned())
    }

    pub fn create_app(&self, app: NewApp) -> Result<AppRecord, StoreError> {
        let now = now_rfc3339();
        let record = AppRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name: app.name,
            icon: app.icon,
            launch_url: app.launch_url,
            grid_row: app.grid_row,
            grid_col: app.grid_col,
            created_at: now.clone(),
            updated_at: now,
        };
        self.mutate(|doc| doc.apps.push(record.clone()))?;
        Ok(record)
    }

    /// Applies `patch` to app `id`. Returns `None` for an unknown id.
    pub fn update_app(&self, id: &str, patch: &AppPatch) -> Result<Option<AppRecord>, StoreError> {
        let now = now_rfc3339();
        self.mutate(|doc| {
            let app = doc.apps.iter_mut().find(|app| app.id == id)?;
            patch.apply_to(app);
            app.updated_at = now;
            Some(app.clone())
        })
    }

    /// Removes app `id` and returns the removed record.
    pub fn delete_app(&self, id: &str) -> Result<Option<AppRecord>, StoreError> {
        self.mutate(|doc| {
            let index = doc.apps.iter().position(|app| app.id == id)?;
            Some(doc.apps.remove(index))
        })
    }

    /// Every config entry, reserved keys included.
    pub fn configs(&self) -> Result<ConfigMap, StoreError> {
        Ok(self.lock()?.configs.clone())
    }

    pub fn get_config(&self, id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.configs.get(id).cloned())
    }

    pub fn upsert_config(&self, id: &str, value: &str) -> Result<ConfigRecord, StoreError> {
        self.mutate(|doc| {
            doc.configs.insert(id.to_string(), value.to_string());
        })?;
        Ok(ConfigRecord {
            id: id.to_string(),
            value: value.to_string(),
        })
    }
}
