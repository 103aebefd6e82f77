// SPDX-License-Identifier: MIT

//! In-memory store for tests and emulator-free local runs.
//!
//! Backed by `DashMap` so the aggregation paths can exercise the same
//! concurrent fan-out they use against Firestore. Failure injection
//! flags let tests cover the isolation requirements (a user read
//! failing mid-build, a snapshot write failing mid-sweep).

use crate::db::WorkoutStore;
use crate::error::AppError;
use crate::models::{LeaderboardOptIn, LeaderboardSnapshot, UserMetricProfile, WorkoutEvent};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory workout store.
#[derive(Default)]
pub struct MemoryStore {
    optins: DashMap<String, LeaderboardOptIn>,
    events: DashMap<String, Vec<WorkoutEvent>>,
    profiles: DashMap<String, UserMetricProfile>,
    snapshots: DashMap<String, LeaderboardSnapshot>,

    // Failure injection
    fail_all_reads: AtomicBool,
    fail_snapshot_writes: AtomicBool,
    fail_events_for: DashMap<String, ()>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an opt-in record.
    pub fn insert_opt_in(&self, opt_in: LeaderboardOptIn) {
        self.optins.insert(opt_in.user_id.clone(), opt_in);
    }

    /// Seed a workout event under its owner.
    pub fn insert_event(&self, event: WorkoutEvent) {
        self.events
            .entry(event.user_id.clone())
            .or_default()
            .push(event);
    }

    /// Seed a metric profile.
    pub fn insert_profile(&self, user_id: &str, profile: UserMetricProfile) {
        self.profiles.insert(user_id.to_string(), profile);
    }

    /// Number of stored snapshots.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Make every read fail, simulating the store being down.
    pub fn set_fail_all_reads(&self, fail: bool) {
        self.fail_all_reads.store(fail, Ordering::SeqCst);
    }

    /// Make snapshot writes fail.
    pub fn set_fail_snapshot_writes(&self, fail: bool) {
        self.fail_snapshot_writes.store(fail, Ordering::SeqCst);
    }

    /// Make event reads fail for one user only.
    pub fn set_fail_events_for(&self, user_id: &str) {
        self.fail_events_for.insert(user_id.to_string(), ());
    }

    fn check_reads(&self) -> Result<(), AppError> {
        if self.fail_all_reads.load(Ordering::SeqCst) {
            return Err(AppError::Database("injected read failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl WorkoutStore for MemoryStore {
    async fn list_opted_in_users(&self) -> Result<Vec<LeaderboardOptIn>, AppError> {
        self.check_reads()?;
        let mut users: Vec<LeaderboardOptIn> = self
            .optins
            .iter()
            .filter(|entry| entry.value().opted_in)
            .map(|entry| entry.value().clone())
            .collect();
        // DashMap iteration order is arbitrary; keep listing stable
        users.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(users)
    }

    async fn list_workout_events(&self, user_id: &str) -> Result<Vec<WorkoutEvent>, AppError> {
        self.check_reads()?;
        if self.fail_events_for.contains_key(user_id) {
            return Err(AppError::Database(format!(
                "injected event read failure for {}",
                user_id
            )));
        }
        let mut events = self
            .events
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        events.sort_by_key(|event| event.date);
        Ok(events)
    }

    async fn get_workout_event(
        &self,
        user_id: &str,
        workout_id: &str,
    ) -> Result<Option<WorkoutEvent>, AppError> {
        self.check_reads()?;
        Ok(self.events.get(user_id).and_then(|entry| {
            entry
                .value()
                .iter()
                .find(|event| event.id == workout_id)
                .cloned()
        }))
    }

    async fn get_metric_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<UserMetricProfile>, AppError> {
        self.check_reads()?;
        Ok(self.profiles.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn put_metric_profile(
        &self,
        user_id: &str,
        profile: &UserMetricProfile,
    ) -> Result<(), AppError> {
        self.profiles.insert(user_id.to_string(), profile.clone());
        Ok(())
    }

    async fn get_snapshot(&self, id: &str) -> Result<Option<LeaderboardSnapshot>, AppError> {
        self.check_reads()?;
        Ok(self.snapshots.get(id).map(|entry| entry.value().clone()))
    }

    async fn put_snapshot(&self, snapshot: &LeaderboardSnapshot) -> Result<(), AppError> {
        if self.fail_snapshot_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database(
                "injected snapshot write failure".to_string(),
            ));
        }
        self.snapshots.insert(snapshot.id.clone(), snapshot.clone());
        Ok(())
    }
}
