// SPDX-License-Identifier: MIT

//! Workout processing service.
//!
//! The per-log-write trigger path:
//! 1. Load the new event, the user's history, and their metric profile
//! 2. Apply XP/level gains and recompute streaks over the full history
//! 3. Detect personal records against the prior history
//! 4. Write the updated profile back
//!
//! Idempotent per workout ID: re-delivery returns the stored totals
//! without double-applying anything.

use crate::db::WorkoutStore;
use crate::error::{AppError, Result};
use crate::models::{PersonalRecord, UserMetricProfile, WorkoutEvent};
use crate::services::gamification::{
    detect_personal_records, evaluate_streaks, level_for_xp, volume_from_exercises, xp_gain,
};
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Gamification outcome of processing one workout event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutcome {
    /// False when this delivery was an idempotent duplicate
    pub newly_processed: bool,
    pub xp_gained: u64,
    pub total_xp: u64,
    pub level: u32,
    pub leveled_up: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub streak_extended: bool,
    pub lifetime_volume: f64,
    pub personal_records: Vec<PersonalRecord>,
}

/// Applies the record/level analysis for newly written workout events.
pub struct WorkoutProcessor {
    store: Arc<dyn WorkoutStore>,
}

impl WorkoutProcessor {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// Process one newly logged workout for a user.
    ///
    /// Returns `NotFound` when the event does not exist (or belongs to
    /// another user).
    pub async fn process(
        &self,
        user_id: &str,
        workout_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ProcessOutcome> {
        let event = self
            .store
            .get_workout_event(user_id, workout_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("workout {}", workout_id)))?;

        let mut profile = self
            .store
            .get_metric_profile(user_id)
            .await?
            .unwrap_or_default();

        if profile.processed_workout_ids.contains(workout_id) {
            tracing::debug!(
                user_id,
                workout_id,
                "Workout already processed (idempotent skip)"
            );
            return Ok(already_processed_outcome(&profile));
        }

        let volume = event
            .volume
            .unwrap_or_else(|| volume_from_exercises(&event.exercises));

        let gained = xp_gain(volume);
        let previous_level = profile.level;
        let new_xp = profile.xp + gained;
        let new_level = level_for_xp(new_xp);

        let history = self.store.list_workout_events(user_id).await?;
        // Exclude this event from the PR baseline; store reads may or
        // may not include it yet depending on write ordering.
        let prior: Vec<WorkoutEvent> = history
            .iter()
            .filter(|past| past.id != event.id)
            .cloned()
            .collect();
        let personal_records = detect_personal_records(&event, &prior);

        let previous_streak = profile.current_streak;
        let workout_dates = history
            .iter()
            .map(|e| e.date.date_naive())
            .chain(std::iter::once(event.date.date_naive()));
        let streaks = evaluate_streaks(workout_dates, now.date_naive());

        profile.lifetime_volume += volume;
        profile.xp = new_xp;
        profile.level = new_level;
        profile.current_streak = streaks.current;
        profile.longest_streak = profile.longest_streak.max(streaks.longest);
        profile.last_workout_date = Some(event.date);
        profile.processed_workout_ids.insert(workout_id.to_string());
        profile.updated_at = format_utc_rfc3339(now);

        self.store.put_metric_profile(user_id, &profile).await?;

        let outcome = ProcessOutcome {
            newly_processed: true,
            xp_gained: gained,
            total_xp: profile.xp,
            level: profile.level,
            leveled_up: new_level > previous_level,
            current_streak: profile.current_streak,
            longest_streak: profile.longest_streak,
            streak_extended: streaks.current > previous_streak,
            lifetime_volume: profile.lifetime_volume,
            personal_records,
        };

        tracing::info!(
            user_id,
            workout_id,
            xp_gained = outcome.xp_gained,
            level = outcome.level,
            current_streak = outcome.current_streak,
            prs = outcome.personal_records.len(),
            "Workout processed"
        );

        Ok(outcome)
    }
}

/// Outcome for a duplicate delivery: stored totals, nothing applied.
fn already_processed_outcome(profile: &UserMetricProfile) -> ProcessOutcome {
    ProcessOutcome {
        newly_processed: false,
        xp_gained: 0,
        total_xp: profile.xp,
        level: profile.level,
        leveled_up: false,
        current_streak: profile.current_streak,
        longest_streak: profile.longest_streak,
        streak_extended: false,
        lifetime_volume: profile.lifetime_volume,
        personal_records: Vec::new(),
    }
}
