//! signalkit-server: trading signal API over a pooled Postgres store
//!
//! Exposes health, summary, and signal list/insert endpoints. Each signal
//! call checks out one pooled connection and runs one statement.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod store;

pub use config::{ConfigError, Settings};
pub use db::{ensure_schema, PgSignalStore, PoolConfig, PoolError, SignalPool};
pub use http::{run_server, ServerConfig, ServerError};
pub use models::{NewSignal, Side, Signal, SignalInput, SignalQuery, ValidationError};
pub use store::{MemorySignalStore, SignalStore, StoreError};
