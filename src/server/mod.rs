//! HTTP server for the user directory using axum.

pub mod middleware;
pub mod routes;

use crate::config::ServerConfig;
use crate::directory::UserDirectory;
use crate::store::{InMemoryUserStore, UserRepository};
use anyhow::{Context, Result};
use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::normalize_path::NormalizePath;
use tracing::{info, warn};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub directory: UserDirectory,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by a fresh in-memory store, seeded unless disabled
    pub fn new(config: ServerConfig) -> Self {
        let store: Arc<dyn UserRepository> = if config.seed {
            InMemoryUserStore::seeded()
        } else {
            InMemoryUserStore::new()
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: ServerConfig, store: Arc<dyn UserRepository>) -> Self {
        Self {
            directory: UserDirectory::new(store),
            config: Arc::new(config),
        }
    }
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let api = routes::routes();
    let app = match state.config.normalized_prefix() {
        Some(prefix) => Router::new().nest(&prefix, api),
        None => api,
    };

    app.fallback(routes::not_found_handler)
        .layer(middleware::catch_panics(state.config.is_development()))
        .layer(middleware::cors())
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

/// Router wrapped so `/users/` and `{prefix}/` route like `/users` and `{prefix}`.
///
/// Path normalization has to run before routing, so it wraps the router
/// instead of being added with `Router::layer`.
pub fn app(state: AppState) -> IntoMakeService<NormalizePath<Router>> {
    let service = NormalizePath::trim_trailing_slash(router(state));
    ServiceExt::<Request>::into_make_service(service)
}

/// Serve on an already bound listener until shutdown is signalled
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    info!("Server stopped");
    Ok(())
}

/// Bind the configured address and run the server
pub async fn run(config: ServerConfig) -> Result<()> {
    let address = config.bind_addr()?;
    let state = AppState::new(config);
    info!(users = state.directory.len(), "User directory initialized");

    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Listening on {}", listener.local_addr()?);

    if let Some(prefix) = state.config.normalized_prefix() {
        info!(prefix = %prefix, "Routes mounted under prefix");
    }

    serve(listener, state).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
