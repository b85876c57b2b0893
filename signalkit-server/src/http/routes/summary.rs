//! Account summary endpoint
//!
//! Fixed placeholder: nothing here is computed from stored signals.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct Pnl {
    pub daily: i64,
    pub weekly: i64,
}

/// Summary response
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub pnl: Pnl,
    pub open_orders: Vec<Value>,
    pub recent_fills: Vec<Value>,
}

/// GET /summary
async fn summary() -> Json<SummaryResponse> {
    Json(SummaryResponse {
        pnl: Pnl {
            daily: 0,
            weekly: 0,
        },
        open_orders: Vec::new(),
        recent_fills: Vec::new(),
    })
}

/// Summary routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/summary", get(summary))
}
