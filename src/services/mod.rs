// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod aggregation;
pub mod duration;
pub mod gamification;
pub mod metrics;
pub mod ranker;
pub mod workout;

pub use aggregation::{AggregationDriver, AggregationReport};
pub use metrics::{compute_metrics, WindowMetrics};
pub use ranker::LeaderboardRanker;
pub use workout::{ProcessOutcome, WorkoutProcessor};
