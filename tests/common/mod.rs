// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use liftboard::config::Config;
use liftboard::db::MemoryStore;
use liftboard::models::profile::DisplayNameType;
use liftboard::models::{LeaderboardOptIn, WorkoutEvent};
use liftboard::routes::create_router;
use liftboard::AppState;
use std::sync::Arc;

/// Secret matching `Config::test_default()`.
#[allow(dead_code)]
pub const TEST_SECRET: &str = "test_aggregation_secret";

/// Create a test app backed by an in-memory store.
/// Returns the router, the shared state, and the store for seeding.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    let config = Config::test_default();
    let store = Arc::new(MemoryStore::new());

    let state = Arc::new(AppState {
        config,
        store: store.clone(),
    });

    (create_router(state.clone()), state, store)
}

/// A minimal resistance workout event.
#[allow(dead_code)]
pub fn make_event(id: &str, user_id: &str, date: &str, volume: f64) -> WorkoutEvent {
    WorkoutEvent {
        id: id.to_string(),
        user_id: user_id.to_string(),
        date: date.parse::<DateTime<Utc>>().expect("valid test date"),
        volume: Some(volume),
        activity_type: None,
        duration: None,
        duration_minutes: None,
        exercises: vec![],
    }
}

/// An opt-in record with default (generated) display identity.
#[allow(dead_code)]
pub fn make_opt_in(user_id: &str, opted_in: bool) -> LeaderboardOptIn {
    LeaderboardOptIn {
        user_id: user_id.to_string(),
        opted_in,
        display_name_type: DisplayNameType::Generated,
        generated_name: None,
        custom_display_name: None,
        avatar_key: None,
    }
}

/// Seed one opted-in user with a single workout event.
#[allow(dead_code)]
pub fn seed_user(store: &MemoryStore, user_id: &str, date: &str, volume: f64) {
    store.insert_opt_in(make_opt_in(user_id, true));
    store.insert_event(make_event(
        &format!("{}-workout", user_id),
        user_id,
        date,
        volume,
    ));
}
