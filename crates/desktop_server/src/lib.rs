//! Backend for the web desktop: app and config persistence, lock-screen verification, icon
//! uploads and the read-only accounts proxy.
//!
//! Every route lives under `/api`. When a built site directory is configured the same listener
//! serves it for all other paths, falling back to `index.html` for client-side routes.

pub mod auth;
pub mod blob;
pub mod config;
pub mod error;
pub mod notion;
pub mod routes;
pub mod seed;
pub mod store;

use std::{io, sync::Arc};

use axum::Router;
use log::info;
use thiserror::Error;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

use crate::{
    blob::{BlobStore, LocalBlobStore},
    config::{ConfigError, ServerConfig},
    notion::{AccountSource, NotionClient},
    store::{Repository, StoreError},
};

/// Shared handles passed to every route.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub blobs: Arc<dyn BlobStore>,
    /// `None` when the accounts proxy is not configured.
    pub accounts: Option<Arc<dyn AccountSource>>,
}

impl AppState {
    /// Opens the repository and builds the blob store and accounts client from `config`.
    pub fn from_config(config: &ServerConfig) -> Result<Self, StoreError> {
        let repo = Repository::open(&config.data_file)?;
        let blobs = LocalBlobStore::new(&config.blob_dir, &config.blob_base_url);
        let accounts = NotionClient::from_config(&config.notion)
            .map(|client| Arc::new(client) as Arc<dyn AccountSource>);
        Ok(Self {
            repo: Arc::new(repo),
            blobs: Arc::new(blobs),
            accounts,
        })
    }
}

#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("server i/o failed: {0}")]
    Io(#[from] io::Error),
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// API routes only, without blob or static file serving.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_router(None))
        .layer(cors())
        .with_state(state)
}

/// Full application: API, stored blobs and the optional built site.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new().nest("/api", routes::api_router(Some(&config.blob_dir)));
    let router = match &config.static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => router,
    };
    router.layer(cors()).with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}

/// Binds and serves until ctrl-c.
pub async fn serve(config: ServerConfig) -> Result<(), ServeError> {
    let addr = config.bind_addr()?;
    let state = AppState::from_config(&config)?;
    info!("data file: {}", config.data_file.display());
    info!("blob dir: {}", config.blob_dir.display());
    match &config.static_dir {
        Some(dir) => info!("serving site from {}", dir.display()),
        None => info!("no static site configured; serving /api only"),
    }
    if state.accounts.is_some() {
        info!("accounts proxy enabled");
    } else {
        info!("accounts proxy disabled: notion secret or database id missing");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state, &config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
