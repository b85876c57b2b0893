//! HTTP server command for the signal API

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use signalkit_server::{
    ensure_schema, run_server, MemorySignalStore, PgSignalStore, ServerConfig, SignalPool,
    SignalStore,
};

use crate::config;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Keep signals in memory instead of Postgres (lost on exit).
    /// Any configured database URL is ignored.
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let settings = config::settings(args.database_url)?;

    let server_config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        env: settings.env.clone(),
    };

    if args.in_memory {
        tracing::warn!("Using in-memory store; signals are lost on exit");
        let store: Arc<dyn SignalStore> = Arc::new(MemorySignalStore::new());
        return run_server(store, server_config)
            .await
            .context("Server error");
    }

    let pool = SignalPool::initialize(&config::pool_config(&settings)?)
        .await
        .context("Failed to create database pool")?;

    ensure_schema(&pool)
        .await
        .context("Failed to prepare signals table")?;

    let store: Arc<dyn SignalStore> = Arc::new(PgSignalStore::new(pool.clone()));

    // Run server (blocks until shutdown), then close the pool either way
    let served = run_server(store, server_config).await;
    pool.shutdown().await;

    served.context("Server error")
}
