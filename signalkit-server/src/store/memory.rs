//! In-memory signal store
//!
//! Same ordering and filtering as the Postgres store. Rows live only as
//! long as the process.

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SignalStore, StoreError};
use crate::models::{NewSignal, Signal, SignalQuery};

#[derive(Debug, Default)]
pub struct MemorySignalStore {
    rows: RwLock<Vec<Signal>>,
}

impl MemorySignalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SignalStore for MemorySignalStore {
    async fn list_signals(&self, query: &SignalQuery) -> Result<Vec<Signal>, StoreError> {
        let rows = self.rows.read().await;

        // Newest insert first so ties on both timestamps still favour it
        let mut matched: Vec<Signal> = rows
            .iter()
            .rev()
            .filter(|s| query.matches(&s.symbol))
            .cloned()
            .collect();
        matched.sort_by_key(|s| (Reverse(s.ts), Reverse(s.created_at)));
        matched.truncate(query.limit() as usize);

        Ok(matched)
    }

    async fn create_signal(&self, signal: NewSignal) -> Result<Signal, StoreError> {
        let now = Utc::now();
        let stored = Signal {
            id: Uuid::new_v4(),
            symbol: signal.symbol.into_string(),
            side: signal.side,
            price: signal.price,
            confidence: signal.confidence,
            note: signal.note,
            ts: signal.ts.unwrap_or(now),
            created_at: now,
        };

        self.rows.write().await.push(stored.clone());
        tracing::debug!(id = %stored.id, symbol = %stored.symbol, "signal stored in memory");

        Ok(stored)
    }

    async fn count_signals(&self) -> Result<i64, StoreError> {
        Ok(self.rows.read().await.len() as i64)
    }
}
