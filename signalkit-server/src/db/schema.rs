//! Signals table setup, run once at startup

use crate::db::pool::SignalPool;
use crate::store::StoreError;

/// Create the signals table and its timestamp index if missing.
pub async fn ensure_schema(pool: &SignalPool) -> Result<(), StoreError> {
    tracing::info!("Ensuring signals schema...");

    let mut conn = pool.acquire().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS signals (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            symbol TEXT NOT NULL,
            side TEXT NOT NULL CHECK (side IN ('buy', 'sell')),
            price DOUBLE PRECISION NOT NULL,
            confidence DOUBLE PRECISION,
            note TEXT,
            ts TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_signals_ts ON signals (ts DESC, created_at DESC)")
        .execute(&mut *conn)
        .await?;

    pool.release(conn);
    tracing::info!("Signals schema ready");
    Ok(())
}
