//! Manual signal helpers: insert, recent, count
//!
//! Thin callers of the store API for poking at the signals table from a
//! terminal. Output is JSON on stdout.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;

use signalkit_server::{PgSignalStore, SignalInput, SignalPool, SignalQuery, SignalStore};

use crate::config;

/// Database selection shared by the signal helpers
#[derive(Parser, Debug)]
pub struct DatabaseArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Arguments for `signalkit insert`
#[derive(Parser, Debug)]
pub struct InsertArgs {
    /// Ticker symbol, e.g. BTC
    #[arg(long)]
    pub symbol: String,

    /// Direction: buy or sell
    #[arg(long)]
    pub side: String,

    /// Observed price
    #[arg(long, allow_negative_numbers = true)]
    pub price: f64,

    /// Optional confidence score
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Optional free-text note
    #[arg(long)]
    pub note: Option<String>,

    /// Signal time, RFC 3339 (default: now)
    #[arg(long)]
    pub ts: Option<DateTime<Utc>>,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Arguments for `signalkit recent`
#[derive(Parser, Debug)]
pub struct RecentArgs {
    /// Number of rows to show (1-500)
    #[arg(long, short = 'n', default_value_t = 10)]
    pub limit: i64,

    /// Only these symbols (comma separated)
    #[arg(long)]
    pub symbols: Option<String>,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Arguments for `signalkit count`
#[derive(Parser, Debug)]
pub struct CountArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Open a pool and wrap it in a store.
async fn open_store(db: DatabaseArgs) -> Result<PgSignalStore> {
    let settings = config::settings(db.database_url)?;
    let pool = SignalPool::initialize(&config::pool_config(&settings)?)
        .await
        .context("Failed to create database pool")?;
    Ok(PgSignalStore::new(pool))
}

/// Insert one signal and print the stored row
pub async fn run_insert(args: InsertArgs) -> Result<()> {
    // Validate before touching the database
    let signal = SignalInput {
        symbol: args.symbol,
        side: args.side,
        price: args.price,
        confidence: args.confidence,
        note: args.note,
        ts: args.ts,
    }
    .validate()?;

    let store = open_store(args.db).await?;
    let stored = store.create_signal(signal).await;
    store.pool().shutdown().await;

    let stored = stored.context("Insert failed")?;
    println!("{}", serde_json::to_string_pretty(&stored)?);
    Ok(())
}

/// Print the newest signals
pub async fn run_recent(args: RecentArgs) -> Result<()> {
    let mut query = SignalQuery::new(Some(args.limit));
    if let Some(symbols) = args.symbols.as_deref() {
        query = query.with_symbol_list(symbols);
    }

    let store = open_store(args.db).await?;
    let rows = store.list_signals(&query).await;
    store.pool().shutdown().await;

    let rows = rows.context("Query failed")?;
    tracing::info!(rows = rows.len(), "fetched recent signals");
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

/// Print the number of stored signals
pub async fn run_count(args: CountArgs) -> Result<()> {
    let store = open_store(args.db).await?;
    let count = store.count_signals().await;
    store.pool().shutdown().await;

    println!("{}", count.context("Count failed")?);
    Ok(())
}
