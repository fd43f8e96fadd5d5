//! Liveness endpoints.

use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};

use crate::app::AppState;

/// `GET /`: service banner.
pub async fn status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "env": state.environment.as_str(),
        "message": "notekeep backend running",
    }))
}

/// `GET /_health`.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "time": Utc::now().to_rfc3339(),
    }))
}
