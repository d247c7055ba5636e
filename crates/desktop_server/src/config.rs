//! Server configuration: optional TOML file, then environment overrides.

use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:8787";
pub const DEFAULT_DATA_FILE: &str = "data/desktop.json";
pub const DEFAULT_BLOB_DIR: &str = "data/blobs";
pub const DEFAULT_BLOB_BASE_URL: &str = "/api/blobs";
pub const DEFAULT_NOTION_API_BASE: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid bind address `{0}`")]
    Bind(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub data_file: PathBuf,
    pub blob_dir: PathBuf,
    pub blob_base_url: String,
    /// Built site served for every path outside `/api`.
    pub static_dir: Option<PathBuf>,
    pub notion: NotionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            blob_dir: PathBuf::from(DEFAULT_BLOB_DIR),
            blob_base_url: DEFAULT_BLOB_BASE_URL.to_string(),
            static_dir: None,
            notion: NotionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    pub secret: Option<String>,
    pub database_id: Option<String>,
    pub api_base: String,
    pub version: String,
    pub columns: NotionColumns,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            database_id: None,
            api_base: DEFAULT_NOTION_API_BASE.to_string(),
            version: DEFAULT_NOTION_VERSION.to_string(),
            columns: NotionColumns::default(),
        }
    }
}

impl NotionConfig {
    /// Secret and database id, when both are present and non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let secret = self.secret.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let database_id = self
            .database_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        Some((secret, database_id))
    }
}

/// Database property names read into each account row. Rows are sorted by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotionColumns {
    pub name: String,
    pub enroll_date: String,
    pub account: String,
    pub password: String,
    pub years: String,
    pub last_activation_date: String,
    pub contract_end_date: String,
    pub memo: String,
}

impl Default for NotionColumns {
    fn default() -> Self {
        Self {
            name: "이름".to_string(),
            enroll_date: "최초가입일".to_string(),
            account: "계정".to_string(),
            password: "비밀번호".to_string(),
            years: "가입년수".to_string(),
            last_activation_date: "최근개통일".to_string(),
            contract_end_date: "약정종료일".to_string(),
            memo: "비고".to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads `path` (when given), then applies process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlays `DESKTOP_*` and `NOTION_*` variables. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(bind) = var("DESKTOP_BIND") {
            self.bind = bind;
        }
        if let Some(path) = var("DESKTOP_DATA_FILE") {
            self.data_file = PathBuf::from(path);
        }
        if let Some(path) = var("DESKTOP_BLOB_DIR") {
            self.blob_dir = PathBuf::from(path);
        }
        if let Some(url) = var("DESKTOP_BLOB_BASE_URL") {
            self.blob_base_url = url;
        }
        if let Some(path) = var("DESKTOP_STATIC_DIR") {
            self.static_dir = Some(PathBuf::from(path));
        }
        if let Some(secret) = var("NOTION_SECRET") {
            self.notion.secret = Some(secret);
        }
        if let Some(database_id) = var("NOTION_DATABASE_ID") {
            self.notion.database_id = Some(database_id);
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::Bind(self.bind.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn file_values_are_overridden_by_environment() {
        let mut config: ServerConfig = toml::from_str(
            r#"
            bind = "0.0.0.0:9000"
            data_file = "/srv/desktop.json"

            [notion]
            database_id = "from-file"

            [notion.columns]
            name = "Name"
            "#,
        )
        .expect("parse config");

        let env = HashMap::from([
            ("DESKTOP_DATA_FILE", "/tmp/override.json"),
            ("NOTION_SECRET", "secret_abc"),
            ("NOTION_DATABASE_ID", "  "),
        ]);
        config.apply_env(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.data_file, PathBuf::from("/tmp/override.json"));
        assert_eq!(config.blob_base_url, DEFAULT_BLOB_BASE_URL);
        assert_eq!(config.notion.columns.name, "Name");
        assert_eq!(config.notion.columns.memo, "비고");
        assert_eq!(
            config.notion.credentials(),
            Some(("secret_abc", "from-file"))
        );
    }

    #[test]
    fn notion_needs_both_credentials() {
        let mut notion = NotionConfig::default();
        assert_eq!(notion.credentials(), None);
        notion.secret = Some("secret".to_string());
        assert_eq!(notion.credentials(), None);
    }

    #[test]
    fn bad_bind_address_is_reported() {
        let config = ServerConfig {
            bind: "localhost".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(config.bind_addr(), Err(ConfigError::Bind(_))));
        assert!(ServerConfig::default().bind_addr().is_ok());
    }
}
