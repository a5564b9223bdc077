//! Catalog endpoints: listing, detail, genre list and insertion.
//!
//! All of these are public. Query parameters are parsed leniently; a
//! malformed `page` or `limit` falls back to its default instead of failing.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_path_id;
use super::{ApiError, AppState, JsonBody, PathParam};
use crate::domain::{CatalogQuery, MovieId};
use crate::models::{Movie, MovieDetail, NewMovie};
use crate::services::{CatalogError, MoviePage};

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => Self::not_found("Movie", id),
            CatalogError::Validation(msg) => Self::validation(msg),
            CatalogError::Database(msg) => Self::DatabaseError(msg),
            CatalogError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// Raw listing parameters; everything is optional and stringly typed so bad
/// numbers can fall back to defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMoviesParams {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// `GET /api/movies`
///
/// Returns `{movies, pagination: {page, limit, total, pages}}`.
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListMoviesParams>,
) -> Result<Json<MoviePage>, ApiError> {
    let catalog = &state.config().catalog;
    let query = CatalogQuery::from_params(
        params.search.as_deref(),
        params.genre.as_deref(),
        params.sort_by.as_deref(),
        params.page.as_deref(),
        params.limit.as_deref(),
        catalog.default_page_size,
        catalog.max_page_size,
    );

    Ok(Json(state.catalog().list_movies(&query).await?))
}

/// `GET /api/movies/{id}`
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<MovieDetail>, ApiError> {
    let id = validate_path_id(id, "movie")?;
    Ok(Json(state.catalog().get_movie(MovieId::new(id)).await?))
}

/// `POST /api/movies`
///
/// Responds `201 Created` with the stored movie.
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<NewMovie>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let movie = state.catalog().create_movie(payload).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// `GET /api/movies/genres`
pub async fn list_genres(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.catalog().genres().await?))
}
