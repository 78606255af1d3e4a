use anyhow::Result;
use axum::Router;
use std::{io::ErrorKind, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;

use routes::routes::AppState;
use services::{
    apod_service::ApodService, record_store::JsonFileStore, token_service::TokenService,
};

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config + init flag ---
    let (cfg, init) = config::AppConfig::from_env_and_args()?;

    tracing::info!("Starting apod-api with config: {:?}", cfg);

    let store = JsonFileStore::new(&cfg.data_path);
    tracing::debug!(
        "Record collection path => {:?}",
        std::fs::canonicalize(store.path()).ok()
    );

    // --- Handle init mode ---
    if init {
        if store.ensure_initialized().await? {
            tracing::info!("Created empty collection at {}", store.path().display());
        } else {
            tracing::info!("Collection already exists at {}", store.path().display());
        }
        return Ok(()); // exit after init
    }

    if !store.path().exists() {
        tracing::warn!(
            "Collection {} does not exist yet; reads will fail until it is created (run with --init)",
            store.path().display()
        );
    }

    // --- Build router ---
    let state = AppState {
        apod: ApodService::new(Arc::new(store)),
        tokens: Arc::new(TokenService::new(&cfg.jwt_secret)),
    };
    let app: Router = routes::routes::routes(state);

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
