//! Tournament query endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use rlsched_core::{Catalog, DayReport, ModeReport, Next, TournamentEntry, UpcomingReport};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::ServerState;

pub async fn get_all(State(state): State<Arc<ServerState>>) -> Result<Json<Catalog>, ApiError> {
    Ok(Json(state.query.all()?))
}

pub async fn get_today(State(state): State<Arc<ServerState>>) -> Result<Json<DayReport>, ApiError> {
    Ok(Json(state.query.today()?))
}

pub async fn get_upcoming(State(state): State<Arc<ServerState>>) -> Result<Json<UpcomingReport>, ApiError> {
    Ok(Json(state.query.upcoming()?))
}

/// Next tournament, or a rollover hint when today is done
pub async fn get_next(State(state): State<Arc<ServerState>>) -> Result<Json<Value>, ApiError> {
    let next = state.query.next()?;
    if next == Next::NoSchedule {
        tracing::warn!("no tournaments scheduled for today; check the schedule data");
    }
    Ok(Json(next_body(next)))
}

/// JSON body for a `Next` outcome
pub fn next_body(next: Next) -> Value {
    match next {
        Next::Upcoming { tournament, time_until } => json!({
            "tournament": tournament,
            "timeUntil": time_until,
        }),
        Next::NoMoreToday { tomorrow } => json!({
            "message": "No more tournaments today",
            "nextRefresh": "Check again tomorrow",
            "tomorrow": tomorrow,
        }),
        Next::NoSchedule => json!({
            "message": "No tournaments scheduled today",
            "nextRefresh": Value::Null,
        }),
    }
}

pub async fn get_by_day(
    State(state): State<Arc<ServerState>>,
    Path(day): Path<String>,
) -> Result<Json<DayReport>, ApiError> {
    Ok(Json(state.query.by_day(&day)?))
}

pub async fn get_by_mode(
    State(state): State<Arc<ServerState>>,
    Path(mode): Path<String>,
) -> Result<Json<ModeReport>, ApiError> {
    Ok(Json(state.query.by_mode(&mode)?))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResponse {
    pub tournaments: Vec<TournamentEntry>,
    pub count: usize,
    pub last_updated: Option<String>,
}

pub async fn get_daily(State(state): State<Arc<ServerState>>) -> Result<Json<DailyResponse>, ApiError> {
    let tournaments = state.query.daily_only()?;
    let summary = state.query.summary()?;
    Ok(Json(DailyResponse {
        count: tournaments.len(),
        tournaments,
        last_updated: summary.last_updated,
    }))
}
