// SPDX-License-Identifier: MIT

//! Database layer: the store trait plus Firestore and in-memory
//! implementations.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{LeaderboardOptIn, LeaderboardSnapshot, UserMetricProfile, WorkoutEvent};

/// Collection names as constants.
pub mod collections {
    pub const WORKOUT_EVENTS: &str = "workout_events";
    pub const PROFILES: &str = "profiles";
    pub const LEADERBOARD_OPTINS: &str = "leaderboard_optins";
    pub const LEADERBOARDS: &str = "leaderboards";
}

/// Read/write interface over the document store.
///
/// Injected into the aggregation driver, ranker, and workout processor
/// so tests can substitute [`MemoryStore`] for Firestore.
#[async_trait::async_trait]
pub trait WorkoutStore: Send + Sync {
    /// List opt-in records for users with `opted_in == true`.
    async fn list_opted_in_users(&self) -> Result<Vec<LeaderboardOptIn>, AppError>;

    /// All workout events for one user.
    async fn list_workout_events(&self, user_id: &str) -> Result<Vec<WorkoutEvent>, AppError>;

    /// One workout event by ID, scoped to its owner.
    async fn get_workout_event(
        &self,
        user_id: &str,
        workout_id: &str,
    ) -> Result<Option<WorkoutEvent>, AppError>;

    /// A user's derived metric profile.
    async fn get_metric_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<UserMetricProfile>, AppError>;

    /// Store a user's derived metric profile.
    async fn put_metric_profile(
        &self,
        user_id: &str,
        profile: &UserMetricProfile,
    ) -> Result<(), AppError>;

    /// The current snapshot for an ID, if any.
    async fn get_snapshot(&self, id: &str) -> Result<Option<LeaderboardSnapshot>, AppError>;

    /// Store a snapshot, replacing any previous document wholesale.
    async fn put_snapshot(&self, snapshot: &LeaderboardSnapshot) -> Result<(), AppError>;
}
