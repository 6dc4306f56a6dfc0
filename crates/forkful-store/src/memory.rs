//! In-memory storage backend.
//!
//! Map-backed and deterministic: ids come from per-entity counters owned by
//! the backend instance, and everything survives only as long as the process.
//! A single `RwLock` guards the maps and the counters together, so id
//! assignment, the username uniqueness check, and read-modify-write updates
//! are atomic with respect to concurrent callers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use forkful_core::{
    Achievement, AchievementId, NewAchievement, NewRecipe, NewUser, Recipe, RecipeId, User, UserId,
};
use tokio::sync::RwLock;

use crate::session::SessionStore;
use crate::{Result, Storage, StoreError};

/// Map and counter state, guarded as one unit.
///
/// `BTreeMap` keyed by raw id means iteration visits records in insertion
/// order, since ids are assigned monotonically.
#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    recipes: BTreeMap<i64, Recipe>,
    achievements: BTreeMap<i64, Achievement>,
    next_user_id: i64,
    next_recipe_id: i64,
    next_achievement_id: i64,
}

/// The in-memory storage backend.
pub struct MemoryStorage {
    inner: RwLock<Inner>,
    sessions: SessionStore,
}

impl MemoryStorage {
    /// Create an empty in-memory store with a default session store.
    ///
    /// Must be called inside a tokio runtime (the session sweeper is spawned
    /// at construction).
    #[must_use]
    pub fn new() -> Self {
        Self::with_sessions(SessionStore::new())
    }

    /// Create an empty in-memory store with the given session store.
    #[must_use]
    pub fn with_sessions(sessions: SessionStore) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            sessions,
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id.as_i64()).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let mut inner = self.inner.write().await;

        // Uniqueness must be checked here, under the write lock: nothing else
        // enforces it for this backend.
        if inner
            .users
            .values()
            .any(|user| user.username == new_user.username)
        {
            return Err(StoreError::UsernameTaken {
                username: new_user.username,
            });
        }

        inner.next_user_id += 1;
        let id = inner.next_user_id;
        let user = User::from_new(UserId::from_raw(id), new_user);
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update_user_streak(&self, id: UserId, streak: i32) -> Result<User> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(&id.as_i64())
            .ok_or(StoreError::NotFound {
                entity: "user",
                id: id.as_i64(),
            })?;
        user.streak = streak;
        Ok(user.clone())
    }

    async fn get_recipes(&self, limit: usize, offset: usize) -> Result<Vec<Recipe>> {
        let inner = self.inner.read().await;
        let mut recipes: Vec<Recipe> = inner.recipes.values().cloned().collect();
        // Stable sort over an id-ordered collection: ties in created_at keep
        // insertion order, so pagination is deterministic.
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes.into_iter().skip(offset).take(limit).collect())
    }

    async fn get_recipes_by_user(&self, user_id: UserId) -> Result<Vec<Recipe>> {
        let inner = self.inner.read().await;
        let mut recipes: Vec<Recipe> = inner
            .recipes
            .values()
            .filter(|recipe| recipe.user_id == user_id)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes)
    }

    async fn create_recipe(&self, new_recipe: NewRecipe) -> Result<Recipe> {
        let mut inner = self.inner.write().await;
        inner.next_recipe_id += 1;
        let id = inner.next_recipe_id;
        let recipe = Recipe::from_new(RecipeId::from_raw(id), new_recipe, Utc::now());
        inner.recipes.insert(id, recipe.clone());
        Ok(recipe)
    }

    async fn get_achievements(&self, user_id: UserId) -> Result<Vec<Achievement>> {
        let inner = self.inner.read().await;
        Ok(inner
            .achievements
            .values()
            .filter(|achievement| achievement.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_achievement(&self, new_achievement: NewAchievement) -> Result<Achievement> {
        let mut inner = self.inner.write().await;
        inner.next_achievement_id += 1;
        let id = inner.next_achievement_id;
        let achievement = Achievement::from_new(AchievementId::from_raw(id), new_achievement);
        inner.achievements.insert(id, achievement.clone());
        Ok(achievement)
    }

    async fn update_achievement(&self, id: AchievementId, earned: bool) -> Result<Achievement> {
        let mut inner = self.inner.write().await;
        let achievement =
            inner
                .achievements
                .get_mut(&id.as_i64())
                .ok_or(StoreError::NotFound {
                    entity: "achievement",
                    id: id.as_i64(),
                })?;
        achievement.earned = earned;
        achievement.earned_at = if earned { Some(Utc::now()) } else { None };
        Ok(achievement.clone())
    }

    fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
