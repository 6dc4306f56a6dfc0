//! Achievement types for Forkful.
//!
//! Achievements are badge-style records owned by a user. Storage defines only
//! the data shape and a manual update operation; deciding *when* an
//! achievement is earned is left to an external policy collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AchievementId, UserId};

/// A badge-style achievement.
///
/// Invariant: `earned_at` is `Some` iff `earned` is true. The two fields only
/// change together, through the storage update operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// The achievement ID, assigned at creation and immutable afterwards.
    pub id: AchievementId,

    /// The owning user.
    pub user_id: UserId,

    /// Category label, e.g. `"first-recipe"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Whether the achievement has been earned.
    pub earned: bool,

    /// When the achievement was earned; `Some` iff `earned`.
    pub earned_at: Option<DateTime<Utc>>,
}

/// Input for creating an achievement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAchievement {
    /// The owning user.
    pub user_id: UserId,

    /// Category label.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Achievement {
    /// Build a full achievement record from a creation input and an assigned
    /// id.
    ///
    /// Fills the defaults: earned false, no earned timestamp.
    #[must_use]
    pub fn from_new(id: AchievementId, new_achievement: NewAchievement) -> Self {
        Self {
            id,
            user_id: new_achievement.user_id,
            kind: new_achievement.kind,
            earned: false,
            earned_at: None,
        }
    }
}
