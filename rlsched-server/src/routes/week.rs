//! Week rotation endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use rlsched_core::{Label, WeekState};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::ServerState;

pub async fn get_week(State(state): State<Arc<ServerState>>) -> Result<Json<WeekState>, ApiError> {
    Ok(Json(state.query.week()?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekUpdate {
    pub current_week: String,
}

/// Pin the rotation label until cleared or the process restarts
pub async fn set_week(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<WeekUpdate>, JsonRejection>,
) -> Result<Json<WeekState>, ApiError> {
    let Json(update) = payload?;
    let label: Label = update.current_week.parse()?;

    let week = state.query.set_week_override(label)?;
    tracing::info!(week = %label, "week override set");
    Ok(Json(week))
}

pub async fn clear_week(State(state): State<Arc<ServerState>>) -> Result<Json<WeekState>, ApiError> {
    let week = state.query.clear_week_override()?;
    tracing::info!(week = %week.current_week, "week override cleared");
    Ok(Json(week))
}
