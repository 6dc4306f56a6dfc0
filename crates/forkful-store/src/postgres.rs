//! `PostgreSQL` storage backend.
//!
//! Durable counterpart to [`MemoryStorage`](crate::MemoryStorage). Identity
//! generation is delegated to `BIGSERIAL` sequences, atomicity to
//! single-statement transactional guarantees (`INSERT .. RETURNING`,
//! `UPDATE .. RETURNING`), and username uniqueness to the unique index on
//! `users.username`. Ordering must match the in-memory backend exactly:
//! `ORDER BY created_at DESC, id ASC`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use forkful_core::{
    Achievement, AchievementId, NewAchievement, NewRecipe, NewUser, Recipe, RecipeId, User, UserId,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::session::SessionStore;
use crate::{Result, Storage, StoreError};

/// Maximum connections held by the pool.
const MAX_POOL_CONNECTIONS: u32 = 5;

/// The `PostgreSQL` storage backend.
pub struct PgStorage {
    pool: PgPool,
    sessions: SessionStore,
}

impl PgStorage {
    /// Connect to the database with a default session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be established.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Self::connect_with_sessions(database_url, SessionStore::new()).await
    }

    /// Connect to the database with the given session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be established.
    pub async fn connect_with_sessions(
        database_url: &str,
        sessions: SessionStore,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_POOL_CONNECTIONS)
            .connect(database_url)
            .await?;
        Ok(Self { pool, sessions })
    }

    /// Run the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails to apply.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

// =============================================================================
// Row types
// =============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    streak: i32,
    total_recipes: i32,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_raw(row.id),
            username: row.username,
            password: row.password,
            streak: row.streak,
            total_recipes: row.total_recipes,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: i64,
    user_id: i64,
    title: String,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    image_data: Option<String>,
    created_at: DateTime<Utc>,
    likes: i32,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: RecipeId::from_raw(row.id),
            user_id: UserId::from_raw(row.user_id),
            title: row.title,
            ingredients: row.ingredients,
            instructions: row.instructions,
            image_data: row.image_data,
            created_at: row.created_at,
            likes: row.likes,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AchievementRow {
    id: i64,
    user_id: i64,
    #[sqlx(rename = "type")]
    kind: String,
    earned: bool,
    earned_at: Option<DateTime<Utc>>,
}

impl From<AchievementRow> for Achievement {
    fn from(row: AchievementRow) -> Self {
        Self {
            id: AchievementId::from_raw(row.id),
            user_id: UserId::from_raw(row.user_id),
            kind: row.kind,
            earned: row.earned,
            earned_at: row.earned_at,
        }
    }
}

/// Clamp a pagination parameter into the range Postgres accepts.
fn to_sql_count(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl Storage for PgStorage {
    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, streak, total_recipes FROM users WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, streak, total_recipes FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let result = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (username, password) VALUES ($1, $2) \
             RETURNING id, username, password, streak, total_recipes",
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(User::from(row)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::UsernameTaken {
                    username: new_user.username,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update_user_streak(&self, id: UserId, streak: i32) -> Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            "UPDATE users SET streak = $2 WHERE id = $1 \
             RETURNING id, username, password, streak, total_recipes",
        )
        .bind(id.as_i64())
        .bind(streak)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::from).ok_or(StoreError::NotFound {
            entity: "user",
            id: id.as_i64(),
        })
    }

    async fn get_recipes(&self, limit: usize, offset: usize) -> Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            "SELECT id, user_id, title, ingredients, instructions, image_data, created_at, likes \
             FROM recipes ORDER BY created_at DESC, id ASC LIMIT $1 OFFSET $2",
        )
        .bind(to_sql_count(limit))
        .bind(to_sql_count(offset))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn get_recipes_by_user(&self, user_id: UserId) -> Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            "SELECT id, user_id, title, ingredients, instructions, image_data, created_at, likes \
             FROM recipes WHERE user_id = $1 ORDER BY created_at DESC, id ASC",
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn create_recipe(&self, new_recipe: NewRecipe) -> Result<Recipe> {
        // created_at is assigned by the database at insertion; clients never
        // supply it.
        let row = sqlx::query_as::<_, RecipeRow>(
            "INSERT INTO recipes (user_id, title, ingredients, instructions, image_data) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, user_id, title, ingredients, instructions, image_data, created_at, likes",
        )
        .bind(new_recipe.user_id.as_i64())
        .bind(&new_recipe.title)
        .bind(&new_recipe.ingredients)
        .bind(&new_recipe.instructions)
        .bind(&new_recipe.image_data)
        .fetch_one(&self.pool)
        .await?;
        Ok(Recipe::from(row))
    }

    async fn get_achievements(&self, user_id: UserId) -> Result<Vec<Achievement>> {
        let rows = sqlx::query_as::<_, AchievementRow>(
            "SELECT id, user_id, type, earned, earned_at FROM achievements WHERE user_id = $1",
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Achievement::from).collect())
    }

    async fn create_achievement(&self, new_achievement: NewAchievement) -> Result<Achievement> {
        let row = sqlx::query_as::<_, AchievementRow>(
            "INSERT INTO achievements (user_id, type) VALUES ($1, $2) \
             RETURNING id, user_id, type, earned, earned_at",
        )
        .bind(new_achievement.user_id.as_i64())
        .bind(&new_achievement.kind)
        .fetch_one(&self.pool)
        .await?;
        Ok(Achievement::from(row))
    }

    async fn update_achievement(&self, id: AchievementId, earned: bool) -> Result<Achievement> {
        // earned and earned_at change in one statement so they can never be
        // observed out of sync.
        let row = sqlx::query_as::<_, AchievementRow>(
            "UPDATE achievements \
             SET earned = $2, earned_at = CASE WHEN $2 THEN now() ELSE NULL END \
             WHERE id = $1 \
             RETURNING id, user_id, type, earned, earned_at",
        )
        .bind(id.as_i64())
        .bind(earned)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Achievement::from).ok_or(StoreError::NotFound {
            entity: "achievement",
            id: id.as_i64(),
        })
    }

    fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
