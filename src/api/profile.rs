//! Endpoints scoped to the signed-in user: profile, stats, watch history and
//! the chat partner list.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::require_id;
use super::{ApiError, AppState, JsonBody, MovieRefRequest};
use crate::domain::MovieId;
use crate::models::{Profile, Stats, UserContact, WatchActivity};
use crate::services::{ProfileError, ProfileUpdate};

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::UserNotFound(id) => Self::not_found("User", id),
            ProfileError::MovieNotFound(id) => Self::not_found("Movie", id),
            ProfileError::Validation(msg) => Self::validation(msg),
            ProfileError::Database(msg) => Self::DatabaseError(msg),
            ProfileError::Internal(msg) => Self::internal(msg),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

/// `GET /api/profile`
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.profiles().get_profile(user).await?))
}

/// `PUT /api/profile`
///
/// Missing or empty fields are left unchanged. Email cannot be changed here.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<UpdateProfileRequest>,
) -> Result<Json<UserContact>, ApiError> {
    let update = ProfileUpdate {
        name: payload.name,
        avatar: payload.avatar,
    };
    Ok(Json(state.profiles().update_profile(user, update).await?))
}

/// `GET /api/stats`
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Stats>, ApiError> {
    Ok(Json(state.profiles().stats(user).await?))
}

/// `POST /api/history`
pub async fn record_watch(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<MovieRefRequest>,
) -> Result<(StatusCode, Json<WatchActivity>), ApiError> {
    let movie = require_id(payload.movie_id, "movieId")?;
    let activity = state
        .profiles()
        .record_watch(user, MovieId::new(movie))
        .await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// `GET /api/users`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<UserContact>>, ApiError> {
    Ok(Json(state.profiles().contacts(user).await?))
}
