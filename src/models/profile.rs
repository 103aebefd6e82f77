// SPDX-License-Identifier: MIT

//! Per-user derived metric state and leaderboard opt-in settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Avatar emojis assigned deterministically per user.
const AVATAR_EMOJIS: [&str; 12] = [
    "🦁", "🐺", "🦅", "🐯", "🦈", "🐻", "🦊", "🐲", "🦍", "🦬", "🦏", "🐘",
];

/// Per-user derived state, mutated only by the workout processing path.
///
/// The leaderboard ranker reads it for the XP pass-through but never
/// writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMetricProfile {
    #[serde(default)]
    pub lifetime_volume: f64,
    #[serde(default)]
    pub xp: u64,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub last_workout_date: Option<DateTime<Utc>>,
    /// Workout IDs already applied to this profile (idempotency guard)
    #[serde(default)]
    pub processed_workout_ids: HashSet<String>,
    #[serde(default)]
    pub updated_at: String,
}

fn default_level() -> u32 {
    1
}

impl Default for UserMetricProfile {
    fn default() -> Self {
        Self {
            lifetime_volume: 0.0,
            xp: 0,
            level: 1,
            current_streak: 0,
            longest_streak: 0,
            last_workout_date: None,
            processed_workout_ids: HashSet::new(),
            updated_at: String::new(),
        }
    }
}

/// Per-user leaderboard opt-in flag and display identity.
///
/// Invariant: a user with `opted_in == false` must never appear in any
/// snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardOptIn {
    pub user_id: String,
    #[serde(default)]
    pub opted_in: bool,
    #[serde(default)]
    pub display_name_type: DisplayNameType,
    #[serde(default)]
    pub generated_name: Option<String>,
    #[serde(default)]
    pub custom_display_name: Option<String>,
    #[serde(default)]
    pub avatar_key: Option<String>,
}

/// Which display name the user chose to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayNameType {
    #[default]
    Generated,
    Custom,
}

impl LeaderboardOptIn {
    /// Resolve the name shown on leaderboards.
    ///
    /// A custom name wins when selected and set, then the generated name,
    /// then a fallback derived from the user ID.
    pub fn display_name(&self) -> String {
        if self.display_name_type == DisplayNameType::Custom {
            if let Some(name) = self.custom_display_name.as_deref() {
                if !name.is_empty() {
                    return name.to_string();
                }
            }
        }
        match self.generated_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("User#{}", truncated_id(&self.user_id)),
        }
    }

    /// Resolve the avatar key: the stored one, or a deterministic pick
    /// from the emoji table keyed by a digest of the user ID.
    pub fn resolved_avatar_key(&self) -> String {
        match self.avatar_key.as_deref() {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => avatar_for_user(&self.user_id).to_string(),
        }
    }
}

fn truncated_id(user_id: &str) -> &str {
    let end = user_id
        .char_indices()
        .nth(4)
        .map_or(user_id.len(), |(i, _)| i);
    &user_id[..end]
}

/// Deterministic avatar emoji for a user ID.
pub fn avatar_for_user(user_id: &str) -> &'static str {
    let digest = Sha256::digest(user_id.as_bytes());
    let sum: usize = digest.iter().map(|b| *b as usize).sum();
    AVATAR_EMOJIS[sum % AVATAR_EMOJIS.len()]
}
