//! Recipe types for Forkful.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{RecipeId, UserId};

/// A posted recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// The recipe ID, assigned at creation and immutable afterwards.
    pub id: RecipeId,

    /// The posting user.
    pub user_id: UserId,

    /// Recipe title (non-empty, validated at the boundary).
    pub title: String,

    /// Ordered ingredient lines.
    pub ingredients: Vec<String>,

    /// Ordered instruction steps.
    pub instructions: Vec<String>,

    /// Optional image captured at upload as an opaque data-URL string.
    pub image_data: Option<String>,

    /// When the recipe was inserted. Set by the storage backend, never
    /// client-supplied, and immutable afterwards.
    pub created_at: DateTime<Utc>,

    /// Like counter, mutated only through a dedicated operation.
    pub likes: i32,
}

/// Input for creating a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    /// The posting user.
    pub user_id: UserId,

    /// Recipe title.
    pub title: String,

    /// Ordered ingredient lines.
    pub ingredients: Vec<String>,

    /// Ordered instruction steps.
    pub instructions: Vec<String>,

    /// Optional image data-URL.
    pub image_data: Option<String>,
}

impl Recipe {
    /// Build a full recipe record from a creation input, an assigned id, and
    /// the insertion timestamp.
    ///
    /// Fills the defaults: likes 0; the image data is carried from the input.
    #[must_use]
    pub fn from_new(id: RecipeId, new_recipe: NewRecipe, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new_recipe.user_id,
            title: new_recipe.title,
            ingredients: new_recipe.ingredients,
            instructions: new_recipe.instructions,
            image_data: new_recipe.image_data,
            created_at,
            likes: 0,
        }
    }
}
