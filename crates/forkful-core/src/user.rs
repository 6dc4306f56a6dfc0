//! User types for Forkful.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// A registered user.
///
/// The password is an opaque credential hashed by the authentication
/// collaborator before it reaches storage; this crate stores and returns it
/// unchanged. The streak and recipe counters are likewise maintained by
/// external policy and only persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user ID, assigned at creation and immutable afterwards.
    pub id: UserId,

    /// Unique username (case-sensitive).
    pub username: String,

    /// Opaque credential.
    pub password: String,

    /// Consecutive-activity counter, updated externally.
    pub streak: i32,

    /// Lifetime recipe count, updated externally.
    pub total_recipes: i32,
}

/// Input for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Requested username.
    pub username: String,

    /// Opaque credential.
    pub password: String,
}

impl User {
    /// Build a full user record from a creation input and an assigned id.
    ///
    /// Fills the defaults: streak 0, total recipes 0.
    #[must_use]
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            username: new_user.username,
            password: new_user.password,
            streak: 0,
            total_recipes: 0,
        }
    }
}
