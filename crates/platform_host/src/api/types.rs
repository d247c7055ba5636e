//! JSON wire records exchanged between the shell and the backend routes.
//!
//! Field names are camelCase on the wire. Request bodies keep their fields optional so the server
//! can reject missing values with a validation error instead of a decode failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::AppIcon;

/// Reserved config key holding the salted lock-screen password hash.
pub const LOCK_PASSWORD_KEY: &str = "lock_password";
/// Config key holding the desktop wallpaper URL.
pub const WALLPAPER_KEY: &str = "wallpaper";
/// Grid row used when a create request omits one.
pub const DEFAULT_GRID_ROW: u32 = 1;
/// Grid column used when a create request omits one.
pub const DEFAULT_GRID_COL: u32 = 1;

/// Key/value settings as returned by `GET /configs`.
pub type ConfigMap = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Persisted application entry.
pub struct AppRecord {
    /// Server-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Icon keyword or URL.
    pub icon: AppIcon,
    /// URL loaded inside the app window.
    pub launch_url: String,
    /// 1-based desktop grid row.
    pub grid_row: u32,
    /// 1-based desktop grid column.
    pub grid_col: u32,
    /// RFC 3339 creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// RFC 3339 last-update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /apps`.
pub struct NewAppRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Display name (required).
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Launch URL (required).
    pub launch_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Icon keyword or URL (required).
    pub icon: Option<AppIcon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Grid row, defaults to [`DEFAULT_GRID_ROW`].
    pub grid_row: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Grid column, defaults to [`DEFAULT_GRID_COL`].
    pub grid_col: Option<u32>,
}

impl NewAppRequest {
    /// Builds a fully populated create request.
    pub fn new(
        name: impl Into<String>,
        launch_url: impl Into<String>,
        icon: AppIcon,
        grid_row: u32,
        grid_col: u32,
    ) -> Self {
        Self {
            name: Some(name.into()),
            launch_url: Some(launch_url.into()),
            icon: Some(icon),
            grid_row: Some(grid_row),
            grid_col: Some(grid_col),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Partial update body of `PATCH /apps/{id}`. Absent fields are left untouched.
pub struct AppPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// New display name.
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// New launch URL.
    pub launch_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// New icon.
    pub icon: Option<AppIcon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// New grid row.
    pub grid_row: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// New grid column.
    pub grid_col: Option<u32>,
}

impl AppPatch {
    /// Patch that only moves an app to `(row, col)`.
    pub fn position(row: u32, col: u32) -> Self {
        Self {
            grid_row: Some(row),
            grid_col: Some(col),
            ..Self::default()
        }
    }

    /// Returns `true` when the patch carries no field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.launch_url.is_none()
            && self.icon.is_none()
            && self.grid_row.is_none()
            && self.grid_col.is_none()
    }

    /// Writes every present field onto `record`.
    pub fn apply_to(&self, record: &mut AppRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(launch_url) = &self.launch_url {
            record.launch_url = launch_url.clone();
        }
        if let Some(icon) = &self.icon {
            record.icon = icon.clone();
        }
        if let Some(row) = self.grid_row {
            record.grid_row = row;
        }
        if let Some(col) = self.grid_col {
            record.grid_col = col;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Persisted configuration entry.
pub struct ConfigRecord {
    /// Config key.
    pub id: String,
    /// Config value.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Body of `PATCH /configs`.
pub struct ConfigPatchRequest {
    #[serde(default)]
    /// Config key (required).
    pub id: Option<String>,
    #[serde(default)]
    /// Config value (required).
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Body of `POST /auth/verify`.
pub struct VerifyPasswordRequest {
    #[serde(default)]
    /// Plaintext candidate password.
    pub password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Response of `POST /auth/verify`.
pub struct VerifyPasswordResponse {
    /// Whether the candidate matched the stored hash.
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Response of `DELETE /apps/{id}`.
pub struct DeleteAppResponse {
    /// Always `true` on a 2xx response.
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Response of `PUT /upload/{filename}`.
pub struct UploadResponse {
    /// Public URL of the stored blob.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Error body returned by every non-2xx route response.
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Upstream error code, when the failure came from a proxied service.
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One row of the proxied accounts database (`GET /skt`).
pub struct AccountRow {
    /// Upstream page id.
    pub id: String,
    /// Account holder name.
    pub name: String,
    /// First enrollment date (`YYYY/MM/DD` or `-`).
    pub enroll_date: String,
    /// Account login.
    pub account: String,
    /// Account password.
    pub pw: String,
    /// Years enrolled.
    pub years: f64,
    /// Most recent activation date.
    pub last_activation_date: String,
    /// Contract end date.
    pub contract_end_date: String,
    /// Free-form memo.
    pub memo: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn app_record_uses_camel_case_fields() {
        let record = AppRecord {
            id: "g".to_string(),
            name: "Google".to_string(),
            icon: AppIcon::parse("search"),
            launch_url: "https://www.google.com/search?igu=1".to_string(),
            grid_row: 1,
            grid_col: 2,
            created_at: String::new(),
            updated_at: String::new(),
        };

        let value = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(value["launchUrl"], json!("https://www.google.com/search?igu=1"));
        assert_eq!(value["gridRow"], json!(1));
        assert_eq!(value["gridCol"], json!(2));
        assert_eq!(value["icon"], json!("search"));
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = AppPatch::position(2, 1);
        let value = serde_json::to_value(&patch).expect("serialize patch");
        assert_eq!(value, json!({ "gridRow": 2, "gridCol": 1 }));
    }

    #[test]
    fn patch_apply_leaves_absent_fields() {
        let mut record = AppRecord {
            id: "v".to_string(),
            name: "VS Code".to_string(),
            icon: AppIcon::parse("monitor"),
            launch_url: "https://vscode.dev".to_string(),
            grid_row: 2,
            grid_col: 1,
            created_at: String::new(),
            updated_at: String::new(),
        };
        let patch = AppPatch {
            name: Some("Code".to_string()),
            ..AppPatch::default()
        };
        patch.apply_to(&mut record);

        assert_eq!(record.name, "Code");
        assert_eq!(record.launch_url, "https://vscode.dev");
        assert_eq!((record.grid_row, record.grid_col), (2, 1));
    }

    #[test]
    fn create_request_tolerates_missing_fields() {
        let request: NewAppRequest =
            serde_json::from_value(json!({ "name": "Docs" })).expect("decode partial body");
        assert_eq!(request.name.as_deref(), Some("Docs"));
        assert!(request.launch_url.is_none());
        assert!(request.grid_row.is_none());
    }
}
