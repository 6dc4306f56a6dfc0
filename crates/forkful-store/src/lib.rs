//! Storage layer for Forkful.
//!
//! This crate provides persistence for users, recipes, and achievements
//! behind a single [`Storage`] contract with two interchangeable backends:
//!
//! - [`MemoryStorage`]: map-backed, deterministic, ideal for tests
//! - [`PgStorage`]: `PostgreSQL`-backed, durable across restarts
//!
//! Both backends must satisfy identical observable behavior — identity
//! assignment, ordering and pagination, uniqueness and update-vs-create
//! semantics — so a caller (and the contract test suite) cannot tell them
//! apart except for durability. Each backend also embeds a [`SessionStore`],
//! a TTL key-value store for authentication session payloads that shares the
//! engine's lifecycle.
//!
//! # Example
//!
//! ```no_run
//! use forkful_core::NewUser;
//! use forkful_store::{MemoryStorage, Storage};
//!
//! # async fn demo() -> forkful_store::Result<()> {
//! let store = MemoryStorage::new();
//!
//! let user = store
//!     .create_user(NewUser {
//!         username: "alice".into(),
//!         password: "hunter2".into(),
//!     })
//!     .await?;
//!
//! let fetched = store.get_user(user.id).await?;
//! assert_eq!(fetched.as_ref(), Some(&user));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
pub mod postgres;
pub mod session;

pub use error::{Result, StoreError};
pub use memory::MemoryStorage;
pub use postgres::PgStorage;
pub use session::SessionStore;

use async_trait::async_trait;
use forkful_core::{
    Achievement, AchievementId, NewAchievement, NewRecipe, NewUser, Recipe, User, UserId,
};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (in-memory for tests, `PostgreSQL` for durability).
/// Calling code depends only on this contract, never on a concrete backend.
#[async_trait]
pub trait Storage: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Get a user by id. Returns `Ok(None)` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Get a user by username (case-sensitive exact match).
    ///
    /// Returns `Ok(None)` on no match rather than erroring.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Create a user, assigning the next id and filling defaults
    /// (streak 0, total recipes 0).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UsernameTaken` if the username already exists.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    /// Replace a user's streak, leaving every other field unchanged.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user does not exist.
    async fn update_user_streak(&self, id: UserId, streak: i32) -> Result<User>;

    // =========================================================================
    // Recipe Operations
    // =========================================================================

    /// List recipes for the feed, newest first, sliced to
    /// `[offset, offset + limit)`.
    ///
    /// Ordering is by creation time descending; ties are broken by insertion
    /// order (ascending id) so pagination is deterministic. An offset past the
    /// end yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_recipes(&self, limit: usize, offset: usize) -> Result<Vec<Recipe>>;

    /// List all of a user's recipes, newest first, unbounded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_recipes_by_user(&self, user_id: UserId) -> Result<Vec<Recipe>>;

    /// Create a recipe, assigning the next id and filling defaults (likes 0,
    /// creation time taken at the moment of insertion, never client-supplied).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn create_recipe(&self, new_recipe: NewRecipe) -> Result<Recipe>;

    // =========================================================================
    // Achievement Operations
    // =========================================================================

    /// List a user's achievements. Order is not guaranteed; callers must not
    /// depend on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_achievements(&self, user_id: UserId) -> Result<Vec<Achievement>>;

    /// Create an achievement, assigning the next id and filling defaults
    /// (earned false, no earned timestamp).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn create_achievement(&self, new_achievement: NewAchievement) -> Result<Achievement>;

    /// Set an achievement's earned state.
    ///
    /// `earned` and `earned_at` change atomically together: earned true sets
    /// the timestamp to now, earned false clears it. This is the only mutation
    /// path for achievement state; when an achievement is earned is decided by
    /// an external policy collaborator.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the achievement does not exist.
    async fn update_achievement(&self, id: AchievementId, earned: bool) -> Result<Achievement>;

    // =========================================================================
    // Session Store
    // =========================================================================

    /// The embedded session store, sharing this engine's lifecycle.
    fn sessions(&self) -> &SessionStore;
}
