//! `SeaORM` implementation of the `FavoriteService` trait.

use async_trait::async_trait;
use tracing::debug;

use crate::db::Store;
use crate::domain::{MovieId, UserId};
use crate::models::Movie;
use crate::services::favorite_service::{FavoriteError, FavoriteService, FavoriteToggle};

pub struct SeaOrmFavoriteService {
    store: Store,
}

impl SeaOrmFavoriteService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FavoriteService for SeaOrmFavoriteService {
    async fn toggle(&self, user: UserId, movie: MovieId) -> Result<FavoriteToggle, FavoriteError> {
        if !self.store.movie_exists(movie).await? {
            return Err(FavoriteError::MovieNotFound(movie));
        }

        let is_favorite = self.store.toggle_favorite(user, movie).await?;

        let action = if is_favorite { "added" } else { "removed" };
        metrics::counter!("favorites_toggled_total", "action" => action).increment(1);
        debug!(user_id = %user, movie_id = %movie, action, "Favorite toggled");

        Ok(FavoriteToggle { is_favorite })
    }

    async fn list(&self, user: UserId) -> Result<Vec<Movie>, FavoriteError> {
        Ok(self.store.favorite_movies(user).await?)
    }
}
