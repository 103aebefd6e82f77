// SPDX-License-Identifier: MIT

//! XP, levels, day-streaks, and personal-record detection.
//!
//! Everything here is pure: the workout processor loads state, runs
//! these functions, and writes the updated profile back.

use crate::models::{LoggedExercise, PersonalRecord, PrKind, WorkoutEvent};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// XP per level.
const XP_PER_LEVEL: u64 = 1000;
/// Base XP for finishing any workout.
const XP_PER_WORKOUT: u64 = 100;

/// XP awarded for one finished workout: 100 for finishing plus 1 per
/// 100 units of volume.
pub fn xp_gain(volume: f64) -> u64 {
    XP_PER_WORKOUT + (volume.max(0.0) / 100.0).floor() as u64
}

/// Level is a pure function of total XP.
pub fn level_for_xp(xp: u64) -> u32 {
    (xp / XP_PER_LEVEL + 1) as u32
}

/// Sum of weight x reps over non-warmup sets.
///
/// Used when a logged event carries sets but no precomputed volume.
pub fn volume_from_exercises(exercises: &[LoggedExercise]) -> f64 {
    exercises
        .iter()
        .flat_map(|exercise| exercise.sets.iter())
        .filter(|set| !set.is_warmup())
        .map(|set| set.weight.unwrap_or(0.0) * f64::from(set.reps.unwrap_or(0)))
        .sum()
}

/// Current and longest day-streak over a user's full history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakSummary {
    /// 0 when the most recent workout day is neither today nor yesterday
    pub current: u32,
    pub longest: u32,
}

/// Evaluate streaks over the distinct calendar dates with at least one
/// workout.
///
/// The longest streak is the longest run of consecutive dates anywhere
/// in history. The current streak is the run ending at the most recent
/// date, but only while that date is today or yesterday relative to the
/// evaluator; once a day has been fully missed it reads 0 until the
/// next log.
pub fn evaluate_streaks<I>(workout_dates: I, today: NaiveDate) -> StreakSummary
where
    I: IntoIterator<Item = NaiveDate>,
{
    // BTreeSet dedups same-day events and gives us ascending order
    let dates: BTreeSet<NaiveDate> = workout_dates.into_iter().collect();
    if dates.is_empty() {
        return StreakSummary::default();
    }

    let mut longest = 1u32;
    let mut run = 1u32;
    let mut prev: Option<NaiveDate> = None;

    for &date in &dates {
        if let Some(prev) = prev {
            if (date - prev).num_days() == 1 {
                run += 1;
            } else {
                run = 1;
            }
        }
        longest = longest.max(run);
        prev = Some(date);
    }

    // `run` now holds the length of the trailing run ending at the most
    // recent date.
    let most_recent = *dates.iter().next_back().unwrap_or(&today);
    let days_ago = (today - most_recent).num_days();
    let current = if (0..=1).contains(&days_ago) { run } else { 0 };

    StreakSummary { current, longest }
}

/// Epley estimate of one-rep-max strength.
///
/// A single rep is the weight itself; zero weight or zero reps estimate
/// nothing.
pub fn estimate_one_rm(weight: f64, reps: u32) -> f64 {
    if reps == 1 {
        return weight;
    }
    if reps == 0 || weight == 0.0 {
        return 0.0;
    }
    (weight * (1.0 + f64::from(reps) / 30.0)).round()
}

/// Detect personal records set by a newly logged event.
///
/// For each non-warmup set, the prior maxima are taken from all sets of
/// the same exercise strictly before it: earlier events in date order,
/// then earlier sets within this event. A max-weight PR and a best-1RM
/// PR are independent; both may fire for the same set.
pub fn detect_personal_records(
    new_event: &WorkoutEvent,
    history: &[WorkoutEvent],
) -> Vec<PersonalRecord> {
    let mut records = Vec::new();

    for exercise in &new_event.exercises {
        let (mut max_weight, mut max_one_rm) = prior_maxima(&exercise.exercise_id, history);

        for set in &exercise.sets {
            if set.is_warmup() {
                continue;
            }
            let weight = set.weight.unwrap_or(0.0);
            let reps = set.reps.unwrap_or(0);
            if weight == 0.0 || reps == 0 {
                continue;
            }
            let one_rm = estimate_one_rm(weight, reps);

            if weight > max_weight {
                records.push(PersonalRecord {
                    kind: PrKind::MaxWeight,
                    exercise_id: exercise.exercise_id.clone(),
                    old_value: max_weight,
                    new_value: weight,
                });
                max_weight = weight;
            }

            if one_rm > max_one_rm {
                records.push(PersonalRecord {
                    kind: PrKind::Best1Rm,
                    exercise_id: exercise.exercise_id.clone(),
                    old_value: max_one_rm,
                    new_value: one_rm,
                });
                max_one_rm = one_rm;
            }
        }
    }

    records
}

/// Max weight and max estimated 1RM across all historical sets of one
/// exercise.
fn prior_maxima(exercise_id: &str, history: &[WorkoutEvent]) -> (f64, f64) {
    let mut max_weight = 0.0f64;
    let mut max_one_rm = 0.0f64;

    for event in history {
        for exercise in &event.exercises {
            if exercise.exercise_id != exercise_id {
                continue;
            }
            for set in &exercise.sets {
                let weight = set.weight.unwrap_or(0.0);
                let reps = set.reps.unwrap_or(0);
                max_weight = max_weight.max(weight);
                max_one_rm = max_one_rm.max(estimate_one_rm(weight, reps));
            }
        }
    }

    (max_weight, max_one_rm)
}
