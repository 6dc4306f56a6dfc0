//! Identifier types for Forkful.
//!
//! This module provides strongly-typed identifiers for users, recipes, and
//! achievements.
//!
//! # Macro-based ID Types
//!
//! The `sequence_id_type!` macro reduces boilerplate for the sequence-based
//! identifier types, ensuring consistent implementation of serialization,
//! parsing, and display traits. Identifiers are monotonically assigned by the
//! storage backend (an in-memory counter or a database sequence) and serialize
//! as plain JSON numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to define a sequence-based identifier type with standard trait
/// implementations.
///
/// This macro generates a newtype wrapper around `i64` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize`, `Deserialize` (transparent, as a number)
/// - `FromStr`, `Display`, `Debug`
/// - `From<i64>`
///
/// # Example
///
/// ```ignore
/// sequence_id_type!(MyId, "A custom identifier type.");
/// let id = MyId::from(7);
/// let parsed: MyId = "7".parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
macro_rules! sequence_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create an identifier from its raw sequence value.
            #[must_use]
            pub const fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            /// Return the raw sequence value.
            #[must_use]
            pub const fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.parse::<i64>().map_err(|_| IdError::NotAnInteger)?;
                Ok(Self(raw))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// Define sequence-based identifier types using the macro
sequence_id_type!(UserId, "A user identifier.\n\nAssigned monotonically by the storage backend at creation.");
sequence_id_type!(RecipeId, "A recipe identifier.\n\nAssigned monotonically by the storage backend at creation; because assignment is monotonic, id order coincides with insertion order.");
sequence_id_type!(AchievementId, "An achievement identifier.\n\nAssigned monotonically by the storage backend at creation.");

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a valid integer identifier.
    #[error("invalid identifier: not an integer")]
    NotAnInteger,
}
