// SPDX-License-Identifier: MIT

//! Liftboard: workout metrics aggregation and leaderboard ranking.
//!
//! This crate turns per-user workout event streams into rolling
//! personal statistics (XP, levels, day-streaks, personal records) and
//! periodic cross-user ranked leaderboard snapshots.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::WorkoutStore;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn WorkoutStore>,
}
