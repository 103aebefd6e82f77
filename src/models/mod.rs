// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod leaderboard;
pub mod profile;
pub mod records;
pub mod workout;

pub use leaderboard::{LeaderboardEntry, LeaderboardSnapshot, Metric, Period};
pub use profile::{LeaderboardOptIn, UserMetricProfile};
pub use records::{PersonalRecord, PrKind};
pub use workout::{ActivityType, LoggedExercise, LoggedSet, SetType, WorkoutEvent};
