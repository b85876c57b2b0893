//! Signal endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{Signal, SignalInput, SignalQuery};

/// Query parameters for GET /signals
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// Query parameters for GET /signals/live
#[derive(Debug, Default, Deserialize)]
pub struct LiveParams {
    /// Comma separated symbols, e.g. `BTC,ETH,SOL`
    pub symbols: Option<String>,
    pub limit: Option<i64>,
}

/// GET /signals/live response
#[derive(Debug, Serialize)]
pub struct LiveResponse {
    pub rows: Vec<Signal>,
}

/// GET /signals - newest signals
async fn list_signals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Signal>>, ApiError> {
    let query = SignalQuery::new(params.limit);
    let rows = state.store.list_signals(&query).await?;
    Ok(Json(rows))
}

/// POST /signals - validate and store a signal
async fn create_signal(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SignalInput>,
) -> Result<(StatusCode, Json<Signal>), ApiError> {
    let signal = input.validate()?;
    let stored = state.store.create_signal(signal).await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /signals/live - newest signals, optionally for a set of symbols
async fn live_signals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LiveParams>,
) -> Result<Json<LiveResponse>, ApiError> {
    let mut query = SignalQuery::checked(params.limit)?;
    if let Some(symbols) = params.symbols.as_deref() {
        query = query.with_symbol_list(symbols);
    }

    let rows = state.store.list_signals(&query).await?;
    Ok(Json(LiveResponse { rows }))
}

/// Signal routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signals", get(list_signals).post(create_signal))
        .route("/signals/live", get(live_signals))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::db::{PgSignalStore, PoolConfig, SignalPool};
    use crate::store::{MemorySignalStore, SignalStore};

    fn app(store: Arc<dyn SignalStore>) -> Router {
        router().with_state(Arc::new(AppState::new(store, "test")))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/signals")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn create_then_list_latest() {
        let store = Arc::new(MemorySignalStore::new());
        let app = app(store);

        let (status, created) =
            send(&app, post(json!({"symbol": "BTC", "side": "buy", "price": 50000}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created["id"].is_string());
        assert!(created["ts"].is_string());
        assert!(created["created_at"].is_string());
        assert_eq!(created["confidence"], Value::Null);

        let (status, rows) = send(&app, get("/signals?limit=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0], created);
    }

    #[tokio::test]
    async fn invalid_side_is_400_and_store_unchanged() {
        let store = Arc::new(MemorySignalStore::new());
        let app = app(store.clone());

        let (status, body) =
            send(&app, post(json!({"symbol": "BTC", "side": "hold", "price": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(store.count_signals().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_defaults_and_clamps_limit() {
        let store = Arc::new(MemorySignalStore::new());
        let app = app(store);

        for i in 0..3 {
            let (status, _) = send(
                &app,
                post(json!({"symbol": "ETH", "side": "sell", "price": 3000 + i})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, rows) = send(&app, get("/signals")).await;
        assert_eq!(rows.as_array().unwrap().len(), 3);

        let (_, rows) = send(&app, get("/signals?limit=0")).await;
        assert_eq!(rows.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn live_filters_symbols_newest_first() {
        let store = Arc::new(MemorySignalStore::new());
        let app = app(store);

        for (symbol, ts) in [
            ("BTC", "2025-08-11T12:00:00Z"),
            ("ETH", "2025-08-11T12:01:00Z"),
            ("SOL", "2025-08-11T12:02:00Z"),
        ] {
            let (status, _) = send(
                &app,
                post(json!({"symbol": symbol, "side": "buy", "price": 1.5, "ts": ts})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, get("/signals/live?symbols=eth,SOL&limit=2")).await;
        assert_eq!(status, StatusCode::OK);

        let symbols: Vec<&str> = body["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["symbol"].as_str().unwrap())
            .collect();
        assert_eq!(symbols, ["SOL", "ETH"]);

        let (_, body) = send(&app, get("/signals/live?symbols=ETH,SOL&limit=1")).await;
        assert_eq!(body["rows"].as_array().unwrap().len(), 1);
        assert_eq!(body["rows"][0]["symbol"], "SOL");
    }

    #[tokio::test]
    async fn live_without_matches_is_empty() {
        let app = app(Arc::new(MemorySignalStore::new()));
        let (status, body) = send(&app, get("/signals/live?symbols=DOGE")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"rows": []}));
    }

    #[tokio::test]
    async fn live_rejects_out_of_range_limit() {
        let app = app(Arc::new(MemorySignalStore::new()));
        for uri in [
            "/signals/live?limit=0",
            "/signals/live?limit=501",
            "/signals/live?symbols=BTC&limit=-5",
        ] {
            let (status, body) = send(&app, get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "validation_error", "{uri}");
        }

        let (status, body) = send(&app, get("/signals/live?limit=500")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"rows": []}));
    }

    #[tokio::test]
    async fn store_failure_is_500() {
        let pool = SignalPool::connect_lazy(
            &PoolConfig::new("postgres://signalkit@localhost:5432/signalkit").with_size(0, 1),
        )
        .unwrap();
        pool.shutdown().await;
        let app = app(Arc::new(PgSignalStore::new(pool)));

        let (status, body) = send(&app, get("/signals")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "store_error");

        let (status, _) =
            send(&app, post(json!({"symbol": "BTC", "side": "sell", "price": 2}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = send(&app, get("/signals/live?symbols=BTC")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
