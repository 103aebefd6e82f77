// SPDX-License-Identifier: MIT

//! Workout event model for storage and metric computation.
//!
//! Documents are shared with the product app, which writes camelCase
//! field names; all serde derives here must stay camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged workout session, immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEvent {
    /// Document ID
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// When the session happened
    pub date: DateTime<Utc>,
    /// Sum of weight x reps across non-warmup sets; absent for pure-cardio sessions
    #[serde(default)]
    pub volume: Option<f64>,
    /// Absent means a resistance session
    #[serde(default)]
    pub activity_type: Option<ActivityType>,
    /// Legacy free-form duration text ("45 min", "30:00")
    #[serde(default)]
    pub duration: Option<String>,
    /// Structured duration written by newer clients; wins over `duration`
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Ordered exercises with their logged sets
    #[serde(default)]
    pub exercises: Vec<LoggedExercise>,
}

impl WorkoutEvent {
    /// Effective activity type; absent means resistance.
    pub fn effective_activity_type(&self) -> ActivityType {
        self.activity_type.unwrap_or(ActivityType::Resistance)
    }
}

/// Activity type of a logged session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Older documents wrote "none" for resistance sessions
    #[serde(alias = "none")]
    Resistance,
    Calisthenics,
    Run,
    Walk,
    Cycle,
    Hiit,
}

impl ActivityType {
    /// Cardio types contribute to the cardio-minutes metric.
    pub fn is_cardio(self) -> bool {
        matches!(self, Self::Run | Self::Walk | Self::Cycle | Self::Hiit)
    }
}

/// One exercise within a logged session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedExercise {
    pub exercise_id: String,
    #[serde(default)]
    pub exercise_name: Option<String>,
    #[serde(default)]
    pub sets: Vec<LoggedSet>,
}

/// One set of an exercise. Missing weight/reps are treated as 0 downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedSet {
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub set_type: Option<SetType>,
}

impl LoggedSet {
    /// Warmup sets are excluded from volume and PR detection.
    pub fn is_warmup(&self) -> bool {
        self.set_type == Some(SetType::Warmup)
    }
}

/// Set type; warmup sets do not count toward volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetType {
    Normal,
    Warmup,
}
