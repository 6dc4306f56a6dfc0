//! Achievement handlers.
//!
//! Only the read side has an HTTP surface: creating achievements and flipping
//! their earned state are storage primitives driven by an external policy
//! collaborator, with no route of their own.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use forkful_core::{Achievement, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// List a user's achievements. Order is not guaranteed.
pub async fn list_user_achievements(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Achievement>>, ApiError> {
    let user_id: UserId = id.parse()?;
    let achievements = state.storage.get_achievements(user_id).await?;
    Ok(Json(achievements))
}
