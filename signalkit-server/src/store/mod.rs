//! Signal store abstraction
//!
//! Handlers and CLI helpers talk to `dyn SignalStore`:
//! - `PgSignalStore` for Postgres (one pooled connection per call)
//! - `MemorySignalStore` for tests and database-less local runs

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::pool::PoolError;
use crate::models::{NewSignal, Signal, SignalQuery};

pub use memory::MemorySignalStore;

/// Store failure. Surfaced to clients as a 500.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Pool(#[from] PoolError),

    /// A stored row that does not map onto `Signal`
    #[error("invalid signal row {id}: {reason}")]
    Decode { id: Uuid, reason: String },
}

/// Persistent signal storage
#[async_trait]
pub trait SignalStore: Send + Sync {
    /// Signals newest first (`ts` desc, then `created_at` desc).
    async fn list_signals(&self, query: &SignalQuery) -> Result<Vec<Signal>, StoreError>;

    /// Insert a validated signal and return the stored row.
    async fn create_signal(&self, signal: NewSignal) -> Result<Signal, StoreError>;

    /// Total number of stored signals.
    async fn count_signals(&self) -> Result<i64, StoreError>;
}
