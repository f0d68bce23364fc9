//! USD-BRL quotation server.
//!
//! Serves `GET /cotacao`: every request fetches the current quotation from the
//! upstream source, records it in a local SQLite database and answers with the
//! bid as `{"bid": "..."}`. Failures at any stage answer 500 with
//! `{"error": "...", "status_code": 500}`.
//!
//! Modules:
//! - `args` / `config`: CLI flags and the `ServerConfig` built from them.
//! - `upstream`: deadline-bounded client for the upstream source.
//! - `store`: `QuotationStore` seam and the SQLite implementation.
//! - `handler`: `AppState`, router and the request handler.
//! - `error` / `result`: `ServerError`, `StoreError` and the `Result` alias.
use std::sync::Arc;

use log::{error, info};
use quotation_common::GoDuration;
use quotation_common::net::addr;
use tokio::net::TcpListener;
use tokio::signal;

pub mod args;
pub mod config;
pub mod error;
pub mod handler;
pub mod result;
pub mod store;
pub mod upstream;

pub use config::ServerConfig;
pub use error::{ServerError, StoreError};
pub use handler::{AppState, create_router};
pub use result::Result;
pub use store::{QuotationStore, SqliteStore};
pub use upstream::UpstreamClient;

/// Bootstrap the database, bind the listener and serve until shutdown.
///
/// Returns `Ok(())` after a graceful shutdown (Ctrl+C or SIGTERM). Any other
/// listener error is returned and is meant to be fatal.
pub async fn run(config: ServerConfig) -> Result<()> {
    let store = SqliteStore::open(&config.database_path).await?;
    store.create_table().await?;
    let upstream = UpstreamClient::new(config.upstream_url.clone())?;

    let address = addr("0.0.0.0", config.port);
    info!("Starting server on port {}", config.port);
    info!("Request timeout: {}", GoDuration::from(config.request_timeout));
    info!("Database timeout: {}", GoDuration::from(config.database_timeout));
    info!("Upstream: {}", upstream.url());

    let state = Arc::new(AppState::new(config, upstream, store));
    let listener = TcpListener::bind(&address).await?;
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
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
    info!("Shutdown signal received");
}
