//! `SeaORM` implementation of the `CatalogService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::domain::{CatalogQuery, MovieId, Pagination};
use crate::models::{Movie, MovieDetail, NewMovie};
use crate::services::catalog_service::{CatalogError, CatalogService, MoviePage};

pub const MIN_YEAR: i32 = 1870;
pub const MAX_YEAR: i32 = 2100;

pub struct SeaOrmCatalogService {
    store: Store,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Trims text fields, drops blank tags and collapses duplicates while keeping
/// first-seen order.
pub fn normalize_new_movie(mut movie: NewMovie) -> Result<NewMovie, CatalogError> {
    movie.title = movie.title.trim().to_string();
    movie.description = movie.description.trim().to_string();
    movie.poster = movie.poster.trim().to_string();
    movie.backdrop = movie
        .backdrop
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty());

    if movie.title.is_empty() {
        return Err(CatalogError::Validation("title is required".to_string()));
    }
    if movie.description.is_empty() {
        return Err(CatalogError::Validation("description is required".to_string()));
    }
    if movie.poster.is_empty() {
        return Err(CatalogError::Validation("poster is required".to_string()));
    }
    if !(0.0..=10.0).contains(&movie.rating) {
        return Err(CatalogError::Validation(
            "rating must be between 0 and 10".to_string(),
        ));
    }
    if movie.duration <= 0 {
        return Err(CatalogError::Validation(
            "duration must be a positive number of minutes".to_string(),
        ));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&movie.year) {
        return Err(CatalogError::Validation(format!(
            "year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }

    let mut genres: Vec<String> = Vec::with_capacity(movie.genre.len());
    for tag in movie.genre.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if !genres.iter().any(|g| g == tag) {
            genres.push(tag.to_string());
        }
    }
    movie.genre = genres;

    Ok(movie)
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn list_movies(&self, query: &CatalogQuery) -> Result<MoviePage, CatalogError> {
        let (movies, total) = self.store.list_movies(query).await?;

        Ok(MoviePage {
            movies,
            pagination: Pagination::new(query.page, total),
        })
    }

    async fn get_movie(&self, id: MovieId) -> Result<MovieDetail, CatalogError> {
        let movie = self
            .store
            .get_movie(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let (favorites, watch_history) = tokio::try_join!(
            self.store.favorites_for_movie(id),
            self.store.watch_history_for_movie(id),
        )?;

        Ok(MovieDetail {
            movie,
            favorites,
            watch_history,
        })
    }

    async fn create_movie(&self, movie: NewMovie) -> Result<Movie, CatalogError> {
        let movie = normalize_new_movie(movie)?;
        Ok(self.store.create_movie(&movie).await?)
    }

    async fn genres(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.store.list_genres().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewMovie {
        NewMovie {
            title: "  Inception ".to_string(),
            description: "Dreams within dreams".to_string(),
            poster: "/placeholder.svg".to_string(),
            backdrop: Some("   ".to_string()),
            genre: vec![
                "Sci-Fi".to_string(),
                " ".to_string(),
                "Thriller".to_string(),
                "Sci-Fi".to_string(),
            ],
            year: 2010,
            rating: 8.8,
            duration: 148,
        }
    }

    #[test]
    fn test_normalize_trims_and_dedupes() {
        let movie = normalize_new_movie(sample()).unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.backdrop, None);
        assert_eq!(movie.genre, vec!["Sci-Fi", "Thriller"]);
    }

    #[test]
    fn test_normalize_rejects_out_of_range_fields() {
        let mut m = sample();
        m.rating = 10.5;
        assert!(matches!(
            normalize_new_movie(m),
            Err(CatalogError::Validation(_))
        ));

        let mut m = sample();
        m.duration = 0;
        assert!(normalize_new_movie(m).is_err());

        let mut m = sample();
        m.year = 1500;
        assert!(normalize_new_movie(m).is_err());

        let mut m = sample();
        m.title = "   ".to_string();
        assert!(normalize_new_movie(m).is_err());
    }

    #[test]
    fn test_rating_bounds_are_inclusive() {
        let mut m = sample();
        m.rating = 0.0;
        assert!(normalize_new_movie(m).is_ok());

        let mut m = sample();
        m.rating = 10.0;
        assert!(normalize_new_movie(m).is_ok());
    }
}
