// SPDX-License-Identifier: MIT

//! Aggregation driver: one invocation sweeps every (metric, period)
//! pair and persists the resulting snapshots.

use crate::db::WorkoutStore;
use crate::models::{Metric, Period};
use crate::services::ranker::LeaderboardRanker;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of one full aggregation sweep.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationReport {
    pub snapshots_written: u32,
    pub total_builds: u32,
    pub failures: Vec<BuildFailure>,
}

impl AggregationReport {
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether every single build failed (store-wide outage).
    pub fn all_failed(&self) -> bool {
        self.failures.len() as u32 == self.total_builds
    }
}

/// One failed (metric, period) build within a sweep.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildFailure {
    pub metric: Metric,
    pub period: Period,
    pub message: String,
}

/// Runs the fixed 5 metrics x 3 periods sweep.
pub struct AggregationDriver {
    store: Arc<dyn WorkoutStore>,
    ranker: LeaderboardRanker,
}

impl AggregationDriver {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        let ranker = LeaderboardRanker::new(store.clone());
        Self { store, ranker }
    }

    /// Run all 15 builds sequentially and persist each snapshot.
    ///
    /// A build or write failure is recorded in the report and the
    /// remaining pairs still run; no pair is skipped silently. Snapshots
    /// with the same ID are replaced wholesale, so overlapping runs race
    /// benignly (last writer wins).
    pub async fn run(&self, now: DateTime<Utc>) -> AggregationReport {
        let total_builds = (Metric::ALL.len() * Period::ALL.len()) as u32;
        let mut snapshots_written = 0u32;
        let mut failures = Vec::new();

        tracing::info!(total_builds, "Starting leaderboard aggregation sweep");

        for metric in Metric::ALL {
            for period in Period::ALL {
                match self.build_and_persist(metric, period, now).await {
                    Ok(participants) => {
                        snapshots_written += 1;
                        tracing::info!(
                            metric = %metric,
                            period = %period,
                            participants,
                            "Snapshot written"
                        );
                    }
                    Err(message) => {
                        tracing::error!(
                            metric = %metric,
                            period = %period,
                            error = %message,
                            "Snapshot build failed"
                        );
                        failures.push(BuildFailure {
                            metric,
                            period,
                            message,
                        });
                    }
                }
            }
        }

        tracing::info!(
            snapshots_written,
            failures = failures.len(),
            "Aggregation sweep complete"
        );

        AggregationReport {
            snapshots_written,
            total_builds,
            failures,
        }
    }

    async fn build_and_persist(
        &self,
        metric: Metric,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<u32, String> {
        let snapshot = self
            .ranker
            .build_snapshot(metric, period, now)
            .await
            .map_err(|e| e.to_string())?;

        let participants = snapshot.total_participants;
        self.store
            .put_snapshot(&snapshot)
            .await
            .map_err(|e| e.to_string())?;

        Ok(participants)
    }
}
