//! Health route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use citegraph_store::GraphQuery;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// GET /api/health: liveness plus current graph counts.
async fn get_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = GraphQuery::new(&state.graph).stats();
    Json(serde_json::json!({
        "status": "healthy",
        "service": "citegraph",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.provider_name,
        "stats": stats,
    }))
}
