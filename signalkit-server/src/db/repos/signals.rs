//! Signal repository backed by Postgres
//!
//! Every call checks out exactly one pooled connection, runs one statement,
//! and hands the connection back whether or not the statement succeeded.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::pool::SignalPool;
use crate::models::{NewSignal, Side, Signal, SignalQuery};
use crate::store::{SignalStore, StoreError};

/// Signal record as stored in the `signals` table
#[derive(Debug, Clone, FromRow)]
struct SignalRow {
    id: Uuid,
    symbol: String,
    side: String,
    price: f64,
    confidence: Option<f64>,
    note: Option<String>,
    ts: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl SignalRow {
    /// Map a row onto the domain type. The only fallible column is `side`.
    fn into_signal(self) -> Result<Signal, StoreError> {
        let side = self.side.parse::<Side>().map_err(|e| StoreError::Decode {
            id: self.id,
            reason: e.to_string(),
        })?;

        Ok(Signal {
            id: self.id,
            symbol: self.symbol,
            side,
            price: self.price,
            confidence: self.confidence,
            note: self.note,
            ts: self.ts,
            created_at: self.created_at,
        })
    }
}

/// Postgres signal store
#[derive(Debug, Clone)]
pub struct PgSignalStore {
    pool: SignalPool,
}

impl PgSignalStore {
    pub fn new(pool: SignalPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SignalPool {
        &self.pool
    }
}

#[async_trait]
impl SignalStore for PgSignalStore {
    /// List signals newest first.
    ///
    /// An empty symbol filter is passed as an empty array and disables the
    /// `ANY` clause, so both cases share one statement.
    async fn list_signals(&self, query: &SignalQuery) -> Result<Vec<Signal>, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, SignalRow>(
            r#"
            SELECT id, symbol, side, price, confidence, note, ts, created_at
            FROM signals
            WHERE cardinality($1::text[]) = 0 OR symbol = ANY($1::text[])
            ORDER BY ts DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(query.symbols().to_vec())
        .bind(i64::from(query.limit()))
        .fetch_all(&mut *conn)
        .await;

        self.pool.release(conn);
        let rows = rows?;

        tracing::debug!(count = rows.len(), limit = query.limit(), "listed signals");
        rows.into_iter().map(SignalRow::into_signal).collect()
    }

    /// Insert a signal, letting the database assign `id`, `created_at` and,
    /// when absent, `ts`.
    async fn create_signal(&self, signal: NewSignal) -> Result<Signal, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query_as::<_, SignalRow>(
            r#"
            INSERT INTO signals (symbol, side, price, confidence, note, ts)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
            RETURNING id, symbol, side, price, confidence, note, ts, created_at
            "#,
        )
        .bind(signal.symbol.as_str())
        .bind(signal.side.as_str())
        .bind(signal.price)
        .bind(signal.confidence)
        .bind(signal.note.as_deref())
        .bind(signal.ts)
        .fetch_one(&mut *conn)
        .await;

        self.pool.release(conn);
        let row = row?;

        tracing::info!(id = %row.id, symbol = %row.symbol, side = %row.side, "signal inserted");
        row.into_signal()
    }

    async fn count_signals(&self) -> Result<i64, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM signals")
            .fetch_one(&mut *conn)
            .await;

        self.pool.release(conn);
        Ok(count?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::db::pool::PoolConfig;
    use crate::db::schema::ensure_schema;
    use crate::models::SignalInput;

    fn row(side: &str) -> SignalRow {
        let ts = Utc.with_ymd_and_hms(2025, 8, 11, 12, 0, 0).unwrap();
        SignalRow {
            id: Uuid::nil(),
            symbol: "BTC".into(),
            side: side.into(),
            price: 50_000.0,
            confidence: None,
            note: None,
            ts,
            created_at: ts,
        }
    }

    #[test]
    fn maps_row_to_signal() {
        let signal = row("sell").into_signal().unwrap();
        assert_eq!(signal.side, Side::Sell);
        assert_eq!(signal.symbol, "BTC");
    }

    #[test]
    fn rejects_row_with_unknown_side() {
        let err = row("hold").into_signal().unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    // Integration tests - run with DATABASE_URL set
    // cargo test -p signalkit-server -- --ignored

    async fn store() -> PgSignalStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = SignalPool::initialize(&PoolConfig::new(url))
            .await
            .expect("pool creation failed");
        ensure_schema(&pool).await.expect("schema setup failed");
        PgSignalStore::new(pool)
    }

    fn input(symbol: &str, side: &str) -> NewSignal {
        SignalInput {
            symbol: symbol.into(),
            side: side.into(),
            price: 50_000.0,
            confidence: Some(0.5),
            note: Some("integration".into()),
            ts: None,
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_list_includes_row_once() {
        let store = store().await;
        let created = store.create_signal(input("btc", "buy")).await.unwrap();
        assert_eq!(created.symbol, "BTC");

        let rows = store
            .list_signals(&SignalQuery::new(Some(500)).with_symbols(["BTC"]))
            .await
            .unwrap();
        assert_eq!(rows.iter().filter(|s| s.id == created.id).count(), 1);
        assert!(rows.iter().all(|s| s.symbol == "BTC"));
        assert!(rows.windows(2).all(|w| w[0].ts >= w[1].ts));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn limit_bounds_rows() {
        let store = store().await;
        store.create_signal(input("ETH", "sell")).await.unwrap();
        store.create_signal(input("SOL", "buy")).await.unwrap();

        let rows = store.list_signals(&SignalQuery::new(Some(1))).await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
