// SPDX-License-Identifier: MIT

//! Public read API for leaderboard snapshots.

use crate::error::{AppError, Result};
use crate::models::leaderboard::snapshot_id;
use crate::models::{LeaderboardSnapshot, Metric, Period};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Public API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/leaderboards/{period}/{metric}", get(get_leaderboard))
}

/// Fetch the current snapshot for a (period, metric) pair.
///
/// The lookup key is the bucket the current aggregation run would
/// write, so a weekly board early in a new month 404s until the first
/// sweep of that month has run.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Path((period, metric)): Path<(String, String)>,
) -> Result<Json<LeaderboardSnapshot>> {
    let period: Period = period
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown period: {}", period)))?;
    let metric: Metric = metric
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown metric: {}", metric)))?;

    let id = snapshot_id(metric, period, chrono::Utc::now());
    let snapshot = state
        .store
        .get_snapshot(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no snapshot for {}", id)))?;

    Ok(Json(snapshot))
}
