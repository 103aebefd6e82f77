// SPDX-License-Identifier: MIT

//! Trigger endpoints for scheduled and manual invocations.
//!
//! Both the daily Cloud Scheduler job and manual requests hit the same
//! endpoints with the shared secret; neither carries parameters. The
//! secret check lives in middleware, so an unauthorized request never
//! reaches these handlers.

use crate::error::Result;
use crate::services::aggregation::AggregationReport;
use crate::services::{AggregationDriver, ProcessOutcome, WorkoutProcessor};
use crate::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Trigger routes (secret-gated by middleware).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks/aggregate-leaderboards", post(aggregate_leaderboards))
        .route("/tasks/process-workout", post(process_workout))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AggregateResponse {
    success: bool,
    #[serde(flatten)]
    report: AggregationReport,
}

/// Run the full 15-build aggregation sweep.
///
/// Partial failures still return 200 with the failed pairs listed; a
/// sweep where every build failed (store down) returns 500 so the
/// scheduler retries and alerts.
async fn aggregate_leaderboards(State(state): State<Arc<AppState>>) -> Response {
    let driver = AggregationDriver::new(state.store.clone());
    let report = driver.run(chrono::Utc::now()).await;

    let status = if report.all_failed() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    let body = AggregateResponse {
        success: report.success(),
        report,
    };

    (status, axum::Json(body)).into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessWorkoutPayload {
    pub user_id: String,
    pub workout_id: String,
}

/// Apply XP/streak/PR analysis for one newly logged workout.
///
/// Idempotent: re-delivery returns the stored totals without
/// double-applying. Returns 404 when the workout does not exist.
async fn process_workout(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProcessWorkoutPayload>,
) -> Result<axum::Json<ProcessOutcome>> {
    let processor = WorkoutProcessor::new(state.store.clone());
    let outcome = processor
        .process(&payload.user_id, &payload.workout_id, chrono::Utc::now())
        .await?;

    Ok(axum::Json(outcome))
}
