//! Favorite endpoints for the signed-in user.

use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::require_id;
use super::{ApiError, AppState, JsonBody, MovieRefRequest};
use crate::domain::MovieId;
use crate::models::Movie;
use crate::services::{FavoriteError, FavoriteToggle};

impl From<FavoriteError> for ApiError {
    fn from(err: FavoriteError) -> Self {
        match err {
            FavoriteError::MovieNotFound(id) => Self::not_found("Movie", id),
            FavoriteError::Database(msg) => Self::DatabaseError(msg),
            FavoriteError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// `GET /api/movies/favorites`
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    Ok(Json(state.favorites().list(user).await?))
}

/// `POST /api/movies/favorites`
///
/// Body `{movieId}`; responds `{isFavorite}` with the state after the flip.
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<MovieRefRequest>,
) -> Result<Json<FavoriteToggle>, ApiError> {
    let movie = require_id(payload.movie_id, "movieId")?;
    Ok(Json(
        state.favorites().toggle(user, MovieId::new(movie)).await?,
    ))
}
