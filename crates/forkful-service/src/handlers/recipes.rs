//! Recipe feed and upload handlers.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use base64::Engine;
use serde::Deserialize;

use forkful_core::{NewRecipe, Recipe, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// Default feed page size.
const DEFAULT_FEED_LIMIT: usize = 10;

/// Feed query parameters.
///
/// Kept as raw strings: non-numeric values fall back to the defaults instead
/// of rejecting the request. A zero limit falls back as well, so `?limit=0`
/// serves the default page rather than an empty one.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Page size (default 10).
    pub limit: Option<String>,
    /// Page start (default 0).
    pub offset: Option<String>,
}

/// List the recipe feed, newest first.
pub async fn list_recipes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let limit = query
        .limit
        .as_deref()
        .and_then(|s| s.parse().ok())
        .filter(|&n| n != 0)
        .unwrap_or(DEFAULT_FEED_LIMIT);
    let offset = query
        .offset
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    let recipes = state.storage.get_recipes(limit, offset).await?;
    Ok(Json(recipes))
}

/// List a user's recipes, newest first.
pub async fn list_user_recipes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let user_id: UserId = id.parse()?;
    let recipes = state.storage.get_recipes_by_user(user_id).await?;
    Ok(Json(recipes))
}

/// Create a recipe from a multipart form.
///
/// Expected parts: `userId`, `title`, `ingredients` and `instructions` as
/// JSON string arrays, and an optional `image` file. The image is captured
/// verbatim as a `data:<mime>;base64,...` string; encoding or resizing it is
/// out of scope.
pub async fn create_recipe(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Recipe>, ApiError> {
    let mut user_id: Option<UserId> = None;
    let mut title: Option<String> = None;
    let mut ingredients: Option<Vec<String>> = None;
    let mut instructions: Option<Vec<String>> = None;
    let mut image_data: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(format!("invalid multipart form: {err}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "userId" => user_id = Some(read_text(field).await?.parse()?),
            "title" => title = Some(read_text(field).await?),
            "ingredients" => ingredients = Some(parse_string_array(&read_text(field).await?)?),
            "instructions" => instructions = Some(parse_string_array(&read_text(field).await?)?),
            "image" => image_data = Some(read_image(field).await?),
            _ => {}
        }
    }

    let user_id =
        user_id.ok_or_else(|| ApiError::BadRequest("missing field: userId".into()))?;
    let title = title.ok_or_else(|| ApiError::BadRequest("missing field: title".into()))?;
    if title.is_empty() {
        return Err(ApiError::BadRequest("title must be non-empty".into()));
    }
    let ingredients =
        ingredients.ok_or_else(|| ApiError::BadRequest("missing field: ingredients".into()))?;
    let instructions =
        instructions.ok_or_else(|| ApiError::BadRequest("missing field: instructions".into()))?;

    let recipe = state
        .storage
        .create_recipe(NewRecipe {
            user_id,
            title,
            ingredients,
            instructions,
            image_data,
        })
        .await?;

    tracing::info!(recipe_id = %recipe.id, user_id = %recipe.user_id, "Recipe created");

    Ok(Json(recipe))
}

/// Read a text part.
async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|err| ApiError::BadRequest(format!("unreadable form field: {err}")))
}

/// Read the image part into a data-URL string.
async fn read_image(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|err| ApiError::BadRequest(format!("unreadable image: {err}")))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{content_type};base64,{encoded}"))
}

/// Parse a form field holding a JSON array of strings.
fn parse_string_array(raw: &str) -> Result<Vec<String>, ApiError> {
    serde_json::from_str(raw)
        .map_err(|_| ApiError::BadRequest("expected a JSON array of strings".into()))
}
