use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{MovieId, UserId};
use crate::entities::{favorites, prelude::*};
use crate::models::{Favorite, FavoriteWithMovie, Movie};

pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Flips membership and returns the new state.
    ///
    /// Delete first: if a row went away the pair is now un-favorited.
    /// Otherwise insert, letting the unique index absorb a concurrent insert
    /// of the same pair. Either way the reported state matches the table.
    pub async fn toggle(&self, user: UserId, movie: MovieId) -> Result<bool> {
        let removed = Favorites::delete_many()
            .filter(favorites::Column::UserId.eq(user.value()))
            .filter(favorites::Column::MovieId.eq(movie.value()))
            .exec(&self.conn)
            .await
            .context("Failed to remove favorite")?;

        if removed.rows_affected > 0 {
            return Ok(false);
        }

        let active = favorites::ActiveModel {
            user_id: Set(user.value()),
            movie_id: Set(movie.value()),
            ..Default::default()
        };

        Favorites::insert(active)
            .on_conflict(
                OnConflict::columns([favorites::Column::UserId, favorites::Column::MovieId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to insert favorite")?;

        Ok(true)
    }

    /// Favorited movies in the order they were favorited.
    pub async fn movies_for_user(&self, user: UserId) -> Result<Vec<Movie>> {
        let rows = Favorites::find()
            .filter(favorites::Column::UserId.eq(user.value()))
            .order_by_asc(favorites::Column::Id)
            .find_also_related(Movies)
            .all(&self.conn)
            .await
            .context("Failed to list favorite movies")?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, movie)| movie.map(Movie::from))
            .collect())
    }

    /// Most recent favorites first.
    pub async fn recent_for_user(
        &self,
        user: UserId,
        limit: u64,
    ) -> Result<Vec<FavoriteWithMovie>> {
        let rows = Favorites::find()
            .filter(favorites::Column::UserId.eq(user.value()))
            .order_by_desc(favorites::Column::Id)
            .limit(limit)
            .find_also_related(Movies)
            .all(&self.conn)
            .await
            .context("Failed to list recent favorites")?;

        Ok(rows
            .into_iter()
            .filter_map(|(favorite, movie)| {
                movie.map(|m| FavoriteWithMovie {
                    favorite: Favorite::from(favorite),
                    movie: Movie::from(m),
                })
            })
            .collect())
    }

    pub async fn for_movie(&self, movie: MovieId) -> Result<Vec<Favorite>> {
        let rows = Favorites::find()
            .filter(favorites::Column::MovieId.eq(movie.value()))
            .order_by_asc(favorites::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list favorites for movie")?;

        Ok(rows.into_iter().map(Favorite::from).collect())
    }

    pub async fn count_for_user(&self, user: UserId) -> Result<u64> {
        Favorites::find()
            .filter(favorites::Column::UserId.eq(user.value()))
            .count(&self.conn)
            .await
            .context("Failed to count favorites")
    }
}
