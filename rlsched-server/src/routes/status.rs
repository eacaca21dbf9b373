//! Health and fallback endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::ServerState;

pub const SERVICE_NAME: &str = "RL Tournament API";

pub const AVAILABLE_ENDPOINTS: [&str; 12] = [
    "GET /health",
    "GET /api/tournaments",
    "GET /api/tournaments/today",
    "GET /api/tournaments/upcoming",
    "GET /api/tournaments/next",
    "GET /api/tournaments/day/:day",
    "GET /api/tournaments/mode/:mode",
    "GET /api/tournaments/daily",
    "POST /api/tournaments/update",
    "GET /api/week",
    "POST /api/week",
    "DELETE /api/week",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
    pub version: &'static str,
    pub tournaments_loaded: usize,
}

pub async fn health_handler(State(state): State<Arc<ServerState>>) -> Result<Json<HealthResponse>, ApiError> {
    let summary = state.query.summary()?;
    Ok(Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        tournaments_loaded: summary.tournaments_loaded,
    }))
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "availableEndpoints": AVAILABLE_ENDPOINTS,
        })),
    )
}
