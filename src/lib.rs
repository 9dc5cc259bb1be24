mod api;
mod config;
mod database;
mod error;
pub mod models;
pub mod repo;
mod schema;
mod validation;

use std::net::SocketAddr;

use axum::{serve::Serve, Router};
use tokio::net::TcpListener;
use tracing::info;

use database::{create_db_pool, DatabaseBookRepo, DatabaseUserRepo};

pub use api::build_app;
pub use config::{Config, ConfigError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to create DB connection pool: {0}")]
    Pool(#[from] diesel_async::pooled_connection::PoolError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
}

/// Connect to the DB, bind the listener and return the server, ready to be awaited
pub async fn start_server(
    config: &Config,
) -> Result<(SocketAddr, Serve<TcpListener, Router, Router>), StartupError> {
    info!(
        database_url = %config.database_url_masked(),
        max_connections = config.max_connections,
        "Creating DB connection pool"
    );
    let pool = create_db_pool(&config.database_url, config.max_connections).await?;

    let router = build_app(
        DatabaseBookRepo::new(pool.clone()),
        DatabaseUserRepo::new(pool),
    );

    let bind_error = |source: std::io::Error| StartupError::Bind {
        addr: config.bind_address,
        source,
    };
    let listener = TcpListener::bind(config.bind_address)
        .await
        .map_err(bind_error)?;
    let local_addr = listener.local_addr().map_err(bind_error)?;
    info!("Listening on {}", local_addr);

    Ok((local_addr, axum::serve(listener, router)))
}
