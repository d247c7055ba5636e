//! In-memory [`DesktopApi`] used by runtime tests and offline previews.

use std::{cell::RefCell, rc::Rc};

use crate::{
    AccountRow, ApiError, AppPatch, AppRecord, ConfigMap, ConfigRecord, DesktopApi,
    DesktopApiFuture, NewAppRequest, DEFAULT_GRID_COL, DEFAULT_GRID_ROW, LOCK_PASSWORD_KEY,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One recorded call against [`MemoryDesktopApi`].
pub enum ApiCall {
    /// `GET /apps`.
    ListApps,
    /// `POST /apps`.
    CreateApp(NewAppRequest),
    /// `PATCH /apps/{id}`.
    PatchApp {
        /// Target id.
        id: String,
        /// Submitted patch.
        patch: AppPatch,
    },
    /// `DELETE /apps/{id}`.
    DeleteApp(String),
    /// `GET /configs`.
    ListConfigs,
    /// `PATCH /configs`.
    UpsertConfig {
        /// Config key.
        id: String,
        /// Config value.
        value: String,
    },
    /// `POST /auth/verify`.
    VerifyPassword,
    /// `PUT /upload/{filename}`.
    UploadIcon(String),
    /// `GET /skt`.
    ListAccounts,
}

#[derive(Debug, Default)]
struct MemoryApiState {
    apps: Vec<AppRecord>,
    configs: ConfigMap,
    accounts: Vec<AccountRow>,
    next_id: u64,
    remaining_successes: Option<usize>,
    calls: Vec<ApiCall>,
}

#[derive(Debug, Clone, Default)]
/// In-memory API with call recording and failure injection.
///
/// The lock password is kept in plaintext under [`LOCK_PASSWORD_KEY`]; hashing is the server's
/// concern.
pub struct MemoryDesktopApi {
    inner: Rc<RefCell<MemoryApiState>>,
}

impl MemoryDesktopApi {
    /// Creates an API pre-populated with `apps`.
    pub fn with_apps(apps: Vec<AppRecord>) -> Self {
        let api = Self::default();
        api.inner.borrow_mut().apps = apps;
        api
    }

    /// Sets a config entry directly (not recorded as a call).
    pub fn set_config(&self, id: &str, value: &str) {
        self.inner
            .borrow_mut()
            .configs
            .insert(id.to_string(), value.to_string());
    }

    /// Replaces the proxied account rows.
    pub fn set_accounts(&self, accounts: Vec<AccountRow>) {
        self.inner.borrow_mut().accounts = accounts;
    }

    /// Lets the next `count` calls succeed, then fails every later call with a transport error.
    pub fn fail_after(&self, count: usize) {
        self.inner.borrow_mut().remaining_successes = Some(count);
    }

    /// Fails every call from now on (`true`) or clears failure injection (`false`).
    pub fn set_offline(&self, offline: bool) {
        self.inner.borrow_mut().remaining_successes = offline.then_some(0);
    }

    /// Current server-side app records.
    pub fn apps(&self) -> Vec<AppRecord> {
        self.inner.borrow().apps.clone()
    }

    /// Current server-side config entries, including the reserved key.
    pub fn configs(&self) -> ConfigMap {
        self.inner.borrow().configs.clone()
    }

    /// Calls recorded so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.inner.borrow().calls.clone()
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        let mut state = self.inner.borrow_mut();
        state.calls.push(call);
        match state.remaining_successes.as_mut() {
            Some(0) => Err(ApiError::Transport("memory api offline".to_string())),
            Some(remaining) => {
                *remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::Status {
            status: 404,
            message: format!("app {id} not found"),
        }
    }
}

impl DesktopApi for MemoryDesktopApi {
    fn list_apps(&self) -> DesktopApiFuture<'_, Result<Vec<AppRecord>, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::ListApps)?;
            Ok(self.inner.borrow().apps.clone())
        })
    }

    fn create_app<'a>(
        &'a self,
        request: &'a NewAppRequest,
    ) -> DesktopApiFuture<'a, Result<AppRecord, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::CreateApp(request.clone()))?;
            let mut state = self.inner.borrow_mut();
            state.next_id += 1;
            let record = AppRecord {
                id: format!("app-{}", state.next_id),
                name: request.name.clone().unwrap_or_default(),
                icon: request.icon.clone().unwrap_or_default(),
                launch_url: request.launch_url.clone().unwrap_or_default(),
                grid_row: request.grid_row.unwrap_or(DEFAULT_GRID_ROW),
                grid_col: request.grid_col.unwrap_or(DEFAULT_GRID_COL),
                created_at: String::new(),
                updated_at: String::new(),
            };
            state.apps.push(record.clone());
            Ok(record)
        })
    }

    fn patch_app<'a>(
        &'a self,
        id: &'a str,
        patch: &'a AppPatch,
    ) -> DesktopApiFuture<'a, Result<AppRecord, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::PatchApp {
                id: id.to_string(),
                patch: patch.clone(),
            })?;
            let mut state = self.inner.borrow_mut();
            let record = state
                .apps
                .iter_mut()
                .find(|app| app.id == id)
                .ok_or_else(|| Self::not_found(id))?;
            patch.apply_to(record);
            Ok(record.clone())
        })
    }

    fn delete_app<'a>(&'a self, id: &'a str) -> DesktopApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::DeleteApp(id.to_string()))?;
            let mut state = self.inner.borrow_mut();
            let before = state.apps.len();
            state.apps.retain(|app| app.id != id);
            if state.apps.len() == before {
                return Err(Self::not_found(id));
            }
            Ok(())
        })
    }

    fn list_configs(&self) -> DesktopApiFuture<'_, Result<ConfigMap, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::ListConfigs)?;
            let mut configs = self.inner.borrow().configs.clone();
            configs.remove(LOCK_PASSWORD_KEY);
            Ok(configs)
        })
    }

    fn upsert_config<'a>(
        &'a self,
        id: &'a str,
        value: &'a str,
    ) -> DesktopApiFuture<'a, Result<ConfigRecord, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::UpsertConfig {
                id: id.to_string(),
                value: value.to_string(),
            })?;
            self.set_config(id, value);
            Ok(ConfigRecord {
                id: id.to_string(),
                value: value.to_string(),
            })
        })
    }

    fn verify_password<'a>(
        &'a self,
        password: &'a str,
    ) -> DesktopApiFuture<'a, Result<bool, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::VerifyPassword)?;
            let state = self.inner.borrow();
            Ok(state
                .configs
                .get(LOCK_PASSWORD_KEY)
                .is_some_and(|stored| stored == password))
        })
    }

    fn upload_icon<'a>(
        &'a self,
        filename: &'a str,
        _bytes: &'a [u8],
    ) -> DesktopApiFuture<'a, Result<String, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::UploadIcon(filename.to_string()))?;
            Ok(format!("/api/blobs/{filename}"))
        })
    }

    fn list_accounts(&self) -> DesktopApiFuture<'_, Result<Vec<AccountRow>, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::ListAccounts)?;
            Ok(self.inner.borrow().accounts.clone())
        })
    }
}
