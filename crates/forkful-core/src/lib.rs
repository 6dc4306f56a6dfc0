//! Core types for Forkful.
//!
//! This crate provides the foundational types used throughout the Forkful
//! recipe-sharing backend:
//!
//! - **Identifiers**: `UserId`, `RecipeId`, `AchievementId`
//! - **Users**: `User`, `NewUser`
//! - **Recipes**: `Recipe`, `NewRecipe`
//! - **Achievements**: `Achievement`, `NewAchievement`
//!
//! Every entity pairs a full record with a creation input (`New*`) that is
//! missing the id and derived fields; the `from_new` constructors fill the
//! defaults. This crate performs no I/O and has no side effects — the storage
//! layer owns identity assignment and timestamps.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod achievement;
pub mod ids;
pub mod recipe;
pub mod user;

pub use achievement::{Achievement, NewAchievement};
pub use ids::{AchievementId, IdError, RecipeId, UserId};
pub use recipe::{NewRecipe, Recipe};
pub use user::{NewUser, User};
