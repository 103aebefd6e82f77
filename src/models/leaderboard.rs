// SPDX-License-Identifier: MIT

//! Leaderboard snapshot documents and the (metric, period) enumeration.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five scored leaderboard metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "totalVolume")]
    TotalVolume,
    #[serde(rename = "workoutCount")]
    WorkoutCount,
    #[serde(rename = "activeDays")]
    ActiveDays,
    #[serde(rename = "xpEarned")]
    XpEarned,
    #[serde(rename = "cardioMinutes")]
    CardioMinutes,
}

impl Metric {
    /// Fixed enumeration order used by the aggregation sweep.
    pub const ALL: [Metric; 5] = [
        Metric::TotalVolume,
        Metric::WorkoutCount,
        Metric::ActiveDays,
        Metric::XpEarned,
        Metric::CardioMinutes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::TotalVolume => "totalVolume",
            Metric::WorkoutCount => "workoutCount",
            Metric::ActiveDays => "activeDays",
            Metric::XpEarned => "xpEarned",
            Metric::CardioMinutes => "cardioMinutes",
        }
    }
}

impl FromStr for Metric {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "totalVolume" => Ok(Metric::TotalVolume),
            "workoutCount" => Ok(Metric::WorkoutCount),
            "activeDays" => Ok(Metric::ActiveDays),
            "xpEarned" => Ok(Metric::XpEarned),
            "cardioMinutes" => Ok(Metric::CardioMinutes),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three competitive time windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Weekly,
    Monthly,
    Alltime,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Weekly, Period::Monthly, Period::Alltime];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Alltime => "alltime",
        }
    }
}

impl FromStr for Period {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "alltime" => Ok(Period::Alltime),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked row in a snapshot. Never persisted outside its snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based, assigned after sorting
    pub rank: u32,
    pub user_id: String,
    pub display_name: String,
    pub avatar_key: String,
    pub value: f64,
}

/// A ranked result document for one (metric, period, bucket) key.
///
/// Replaced wholesale on each aggregation run; never patched
/// field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSnapshot {
    pub id: String,
    pub metric: Metric,
    pub period: Period,
    /// At most 100 entries, rank-ascending
    pub entries: Vec<LeaderboardEntry>,
    /// Full opted-in candidate count before truncation
    pub total_participants: u32,
    /// RFC3339 instant of the aggregation run
    pub updated_at: String,
}

/// Deterministic snapshot document ID.
///
/// Weekly and monthly share the `{YYYY}_{MM}` month bucket on purpose:
/// within a month only the most recent weekly run is retained, which is
/// the intended "current week" semantics. Alltime snapshots are
/// bucket-free (one eternal document per metric).
pub fn snapshot_id(metric: Metric, period: Period, now: DateTime<Utc>) -> String {
    match period {
        Period::Alltime => format!("{}_{}", period, metric),
        Period::Weekly | Period::Monthly => {
            format!("{}_{}_{}_{:02}", period, metric, now.year(), now.month())
        }
    }
}
