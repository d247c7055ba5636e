//! Uploaded icon storage.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("invalid blob name `{0}`")]
    InvalidName(String),
    #[error("blob i/o failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Store for uploaded files addressed by public URL.
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` and returns the public URL.
    fn put(&self, filename: &str, bytes: &[u8]) -> Result<String, BlobError>;

    /// Whether `url` points into this store.
    fn owns(&self, url: &str) -> bool;

    /// Deletes the blob behind `url`. Returns `false` when it did not exist.
    fn delete(&self, url: &str) -> Result<bool, BlobError>;
}

/// Keeps a filename's safe characters, replacing everything else with `_`.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Blobs stored as files in one directory and served under `base_url`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    dir: PathBuf,
    base_url: String,
}

impl LocalBlobStore {
    pub fn new(dir: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn name_for<'a>(&self, url: &'a str) -> Option<&'a str> {
        let name = url
            .strip_prefix(self.base_url.as_str())?
            .strip_prefix('/')?;
        (!name.is_empty() && !name.contains(['/', '\\']) && !name.starts_with('.')).then_some(name)
    }
}

impl BlobStore for LocalBlobStore {
    fn put(&self, filename: &str, bytes: &[u8]) -> Result<String, BlobError> {
        let safe =
            sanitize_filename(filename).ok_or_else(|| BlobError::InvalidName(filename.into()))?;
        let name = format!("{}-{safe}", uuid::Uuid::new_v4().simple());
        let path = self.dir.join(&name);
        let io_err = |source| BlobError::Io {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(&path, bytes).map_err(io_err)?;
        Ok(format!("{}/{name}", self.base_url))
    }

    fn owns(&self, url: &str) -> bool {
        self.name_for(url).is_some()
    }

    fn delete(&self, url: &str) -> Result<bool, BlobError> {
        let name = self
            .name_for(url)
            .ok_or_else(|| BlobError::InvalidName(url.to_string()))?;
        let path = self.dir.join(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(BlobError::Io { path, source }),
        }
    }
}
