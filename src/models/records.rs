// SPDX-License-Identifier: MIT

//! Personal record signals emitted at workout processing time.
//!
//! These are computed, returned to the caller, and never persisted by
//! this engine.

use serde::{Deserialize, Serialize};

/// Kind of personal record. Wire values (`max_weight`/`best_1rm`)
/// match what the product app already renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrKind {
    MaxWeight,
    #[serde(rename = "best_1rm")]
    Best1Rm,
}

/// A new personal record detected on a freshly logged set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    #[serde(rename = "type")]
    pub kind: PrKind,
    pub exercise_id: String,
    pub old_value: f64,
    pub new_value: f64,
}
