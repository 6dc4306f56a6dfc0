//! User registration and profile handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use forkful_core::{NewUser, User, UserId};
use forkful_store::StoreError;

use crate::error::ApiError;
use crate::state::AppState;

/// User response.
///
/// The stored credential is never serialized into API responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Consecutive-activity counter.
    pub streak: i32,
    /// Lifetime recipe count.
    pub total_recipes: i32,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            streak: user.streak,
            total_recipes: user.total_recipes,
        }
    }
}

/// Register request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Requested username.
    pub username: String,
    /// Credential, already hashed by the authentication collaborator.
    pub password: String,
}

/// Register a new user.
///
/// Responds 400 both on validation failure and on a username conflict, the
/// register boundary's contract.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "username and password must be non-empty".into(),
        ));
    }

    let result = state
        .storage
        .create_user(NewUser {
            username: body.username,
            password: body.password,
        })
        .await;

    match result {
        Ok(user) => {
            tracing::info!(user_id = %user.id, username = %user.username, "User registered");
            Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
        }
        Err(StoreError::UsernameTaken { username }) => Err(ApiError::BadRequest(format!(
            "username already taken: {username}"
        ))),
        Err(err) => Err(err.into()),
    }
}

/// Get a user profile by id.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id: UserId = id.parse()?;
    let user = state
        .storage
        .get_user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user not found: {id}")))?;

    Ok(Json(UserResponse::from(&user)))
}
