// SPDX-License-Identifier: MIT

//! Leaderboard snapshot building: score every opted-in user for one
//! (metric, period) pair, then sort, rank, and truncate.

use crate::db::WorkoutStore;
use crate::error::AppError;
use crate::models::leaderboard::snapshot_id;
use crate::models::{LeaderboardEntry, LeaderboardOptIn, LeaderboardSnapshot, Metric, Period};
use crate::services::metrics::compute_metrics;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Datelike, Days, NaiveTime, Utc};
use futures_util::{stream, StreamExt};
use std::sync::Arc;

/// Persisted snapshots keep at most this many ranked entries.
pub const MAX_LEADERBOARD_ENTRIES: usize = 100;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// An unranked scored user, before sorting.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub user_id: String,
    pub display_name: String,
    pub avatar_key: String,
    pub value: f64,
}

/// Builds ranked snapshots from the raw event store.
///
/// Reads workout events and opt-in records; never writes profiles or
/// snapshots itself.
#[derive(Clone)]
pub struct LeaderboardRanker {
    store: Arc<dyn WorkoutStore>,
}

impl LeaderboardRanker {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// Build the snapshot for one (metric, period) pair as of `now`.
    ///
    /// Per-user reads run concurrently with a bound; a user whose reads
    /// fail is skipped with a warning and does not count toward
    /// `total_participants`. Ranking happens only after the full
    /// candidate set is collected.
    pub async fn build_snapshot(
        &self,
        metric: Metric,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<LeaderboardSnapshot, AppError> {
        let users = self.store.list_opted_in_users().await?;
        let window_start = window_start(period, now);

        let candidates: Vec<Candidate> = stream::iter(users)
            .map(|opt_in| self.score_user(opt_in, metric, window_start))
            .buffered(MAX_CONCURRENT_DB_OPS)
            .filter_map(|candidate| async move { candidate })
            .collect()
            .await;

        let total_participants = candidates.len() as u32;
        let entries = rank_candidates(candidates);

        Ok(LeaderboardSnapshot {
            id: snapshot_id(metric, period, now),
            metric,
            period,
            entries,
            total_participants,
            updated_at: format_utc_rfc3339(now),
        })
    }

    /// Score one opted-in user, or skip them when their reads fail.
    async fn score_user(
        &self,
        opt_in: LeaderboardOptIn,
        metric: Metric,
        window_start: Option<DateTime<Utc>>,
    ) -> Option<Candidate> {
        let events = match self.store.list_workout_events(&opt_in.user_id).await {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(
                    user_id = %opt_in.user_id,
                    error = %err,
                    "Skipping user: failed to read workout events"
                );
                return None;
            }
        };

        let profile_xp = match self.store.get_metric_profile(&opt_in.user_id).await {
            Ok(profile) => profile.map(|p| p.xp).unwrap_or(0),
            Err(err) => {
                tracing::warn!(
                    user_id = %opt_in.user_id,
                    error = %err,
                    "Skipping user: failed to read metric profile"
                );
                return None;
            }
        };

        let metrics = compute_metrics(&events, profile_xp, window_start);

        Some(Candidate {
            display_name: opt_in.display_name(),
            avatar_key: opt_in.resolved_avatar_key(),
            user_id: opt_in.user_id,
            value: metrics.value_for(metric),
        })
    }
}

/// Window lower bound for a period, UTC-normalized.
///
/// Weekly runs from the most recent Monday 00:00:00 UTC, monthly from
/// the first of the current UTC month; alltime has no bound.
pub fn window_start(period: Period, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let today = now.date_naive();
    let midnight = |date: chrono::NaiveDate| date.and_time(NaiveTime::MIN).and_utc();

    match period {
        Period::Weekly => {
            let days_to_monday = (today.weekday().num_days_from_sunday() + 6) % 7;
            today
                .checked_sub_days(Days::new(u64::from(days_to_monday)))
                .map(midnight)
        }
        Period::Monthly => today.with_day(1).map(midnight),
        Period::Alltime => None,
    }
}

/// Sort candidates, assign dense 1-based ranks, and truncate.
///
/// Order is value descending with user ID ascending as the tie-break,
/// so repeated runs over the same data produce identical snapshots.
/// Ties get consecutive distinct ranks.
pub fn rank_candidates(mut candidates: Vec<Candidate>) -> Vec<LeaderboardEntry> {
    candidates.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    candidates
        .into_iter()
        .take(MAX_LEADERBOARD_ENTRIES)
        .enumerate()
        .map(|(idx, candidate)| LeaderboardEntry {
            rank: idx as u32 + 1,
            user_id: candidate.user_id,
            display_name: candidate.display_name,
            avatar_key: candidate.avatar_key,
            value: candidate.value,
        })
        .collect()
}
