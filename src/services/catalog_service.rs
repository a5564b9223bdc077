//! Domain service for browsing and extending the movie catalog.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{CatalogQuery, MovieId, Pagination};
use crate::models::{Movie, MovieDetail, NewMovie};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Movie not found: {0}")]
    NotFound(MovieId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, Serialize)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub pagination: Pagination,
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Filters, sorts and pages the catalog.
    ///
    /// `pagination.pages` is `ceil(total / limit)` and `movies` never holds
    /// more than `limit` entries.
    async fn list_movies(&self, query: &CatalogQuery) -> Result<MoviePage, CatalogError>;

    /// A movie with its favorite and watch-history rows.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the id is unknown.
    async fn get_movie(&self, id: MovieId) -> Result<MovieDetail, CatalogError>;

    /// Inserts a movie after normalizing its genre tags.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] for out-of-range fields.
    async fn create_movie(&self, movie: NewMovie) -> Result<Movie, CatalogError>;

    /// Every distinct genre tag, sorted.
    async fn genres(&self) -> Result<Vec<String>, CatalogError>;
}
