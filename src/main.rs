use anyhow::Result;
use axum::Router;
use std::{fs, io::ErrorKind, path::Path};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;
mod state;

use services::{disk_storage::DiskStorage, gallery::GalleryService, metadata_store::MetadataStore};

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config ---
    let cfg = config::AppConfig::from_env_and_args()?;

    tracing::info!("Starting kdd-gallery with config: {:?}", cfg);

    // --- Ensure uploads directory exists ---
    if !Path::new(&cfg.uploads_dir).exists() {
        fs::create_dir_all(&cfg.uploads_dir)?;
        tracing::info!("Created uploads directory at {}", cfg.uploads_dir);
    }

    // --- Ensure the metadata document's directory exists ---
    if let Some(parent) = Path::new(&cfg.metadata_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            tracing::info!("Created metadata directory {:?}", parent);
        }
    }

    // --- Initialize core services ---
    let gallery = GalleryService::new(
        DiskStorage::new(cfg.uploads_dir.clone()),
        MetadataStore::new(cfg.metadata_path.clone()),
    );
    let state = state::AppState::new(gallery);

    // --- Build router ---
    let app: Router = routes::routes::routes().with_state(state);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
