// SPDX-License-Identifier: MIT

//! Windowed metric computation over a user's workout events.

use crate::models::{Metric, WorkoutEvent};
use crate::services::duration::parse_minutes;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// The five scored metrics for one user over one window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowMetrics {
    pub total_volume: f64,
    pub workout_count: u32,
    pub active_days: u32,
    pub xp_earned: u64,
    pub cardio_minutes: u32,
}

impl WindowMetrics {
    /// Extract the scalar for one leaderboard metric.
    pub fn value_for(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TotalVolume => self.total_volume,
            Metric::WorkoutCount => f64::from(self.workout_count),
            Metric::ActiveDays => f64::from(self.active_days),
            Metric::XpEarned => self.xp_earned as f64,
            Metric::CardioMinutes => f64::from(self.cardio_minutes),
        }
    }
}

/// Compute all five metrics for a user.
///
/// Events before `window_start` are excluded; the boundary itself is
/// inclusive. `profile_xp` is the user's running XP total passed through
/// unchanged for every window, matching how the product has always
/// displayed it (see DESIGN.md).
pub fn compute_metrics(
    events: &[WorkoutEvent],
    profile_xp: u64,
    window_start: Option<DateTime<Utc>>,
) -> WindowMetrics {
    let retained = events
        .iter()
        .filter(|event| window_start.is_none_or(|start| event.date >= start));

    let mut metrics = WindowMetrics {
        xp_earned: profile_xp,
        ..WindowMetrics::default()
    };
    let mut days_seen = HashSet::new();

    for event in retained {
        metrics.total_volume += event.volume.unwrap_or(0.0);
        metrics.workout_count += 1;
        days_seen.insert(event.date.date_naive());

        if event.effective_activity_type().is_cardio() {
            // Stored documents are client-written; saturate rather than
            // let an absurd minute count wrap the sum.
            metrics.cardio_minutes = metrics.cardio_minutes.saturating_add(cardio_minutes_for(event));
        }
    }

    metrics.active_days = days_seen.len() as u32;
    metrics
}

/// Minutes contributed by a single cardio event.
///
/// A structured minute count wins over parsing the legacy text.
fn cardio_minutes_for(event: &WorkoutEvent) -> u32 {
    if let Some(minutes) = event.duration_minutes {
        return minutes;
    }
    event
        .duration
        .as_deref()
        .and_then(parse_minutes)
        .unwrap_or(0)
}
