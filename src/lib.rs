pub mod api;
pub mod config;
pub mod model;
pub mod store;

pub use api::routes::create_router;
pub use model::*;
pub use store::{MemoryStore, PostgresStore, Store, StoreError};

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppConfig, StoreBackend};

/// Open the configured store, serve until a shutdown signal arrives and
/// release the pool afterwards.
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    match config.store {
        StoreBackend::Postgres => {
            log::info!("Connecting to PostgreSQL...");
            let store = PostgresStore::new(&config.database_url(), config.max_connections()).await?;

            log::info!("Running database migrations...");
            store.migrate().await?;

            let store = Arc::new(store);
            serve(Arc::clone(&store), &config).await?;

            log::info!("Closing connection pool");
            store.close().await;
        }
        StoreBackend::Memory => {
            log::warn!("Using the in-memory store; data is lost on exit");
            serve(Arc::new(MemoryStore::new()), &config).await?;
        }
    }

    Ok(())
}

async fn serve<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<()> {
    let app: Router = create_router::<S>().with_state(store);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("District registry running on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
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

    log::info!("Shutdown signal received");
}
