//! Domain service for per-user favorite membership.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{MovieId, UserId};
use crate::models::Movie;

#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("Movie not found: {0}")]
    MovieNotFound(MovieId),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for FavoriteError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for FavoriteError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteToggle {
    pub is_favorite: bool,
}

#[async_trait::async_trait]
pub trait FavoriteService: Send + Sync {
    /// Flips the (user, movie) membership and reports the resulting state.
    ///
    /// Calling it twice returns opposite values.
    ///
    /// # Errors
    ///
    /// Returns [`FavoriteError::MovieNotFound`] if the movie does not exist.
    async fn toggle(&self, user: UserId, movie: MovieId) -> Result<FavoriteToggle, FavoriteError>;

    /// Favorited movies, oldest favorite first.
    async fn list(&self, user: UserId) -> Result<Vec<Movie>, FavoriteError>;
}
