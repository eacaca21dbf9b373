//! Schedule ingestion endpoint
//!
//! Accepts a full schedule document and replaces the store contents with it.
//! The document is validated as a whole first; a rejected payload leaves the
//! served schedule untouched.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use rlsched_core::ScheduleDocument;
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::ServerState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub message: &'static str,
    pub count: usize,
    pub last_updated: Option<String>,
    pub timestamp: String,
}

pub async fn update_schedule(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<ScheduleDocument>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let Json(doc) = payload.inspect_err(|e| tracing::warn!("rejected schedule update: {}", e.body_text()))?;

    let summary = state.query.replace_schedule(doc).inspect_err(|e| {
        tracing::warn!("rejected schedule update: {}", e);
    })?;

    tracing::info!(
        count = summary.tournaments_loaded,
        last_updated = summary.last_updated.as_deref().unwrap_or("-"),
        "schedule replaced"
    );

    Ok(Json(UpdateResponse {
        message: "Success",
        count: summary.tournaments_loaded,
        last_updated: summary.last_updated,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
