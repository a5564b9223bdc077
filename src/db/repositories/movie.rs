use std::collections::{BTreeSet, HashMap};

use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tracing::info;

use crate::domain::{CatalogQuery, GenreFilter, MovieId, MovieSort, now_timestamp, search_text};
use crate::entities::{movies, prelude::*};
use crate::models::movie::decode_genres;
use crate::models::{Movie, MovieSummary, NewMovie};

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn filtered(query: &CatalogQuery) -> Select<Movies> {
        let mut select = Movies::find();

        if let Some(pattern) = query.search_pattern() {
            select = select
                .filter(movies::Column::SearchText.like(LikeExpr::new(pattern).escape('\\')));
        }

        // Tags are stored JSON-quoted, so matching the quoted tag only hits
        // whole elements ("Drama" never matches "Melodrama").
        if let GenreFilter::Tag(tag) = &query.genre {
            let needle = serde_json::to_string(tag).unwrap_or_default();
            select = select.filter(Expr::cust_with_values("instr(genres, ?) > 0", [needle]));
        }

        select
    }

    fn sorted(select: Select<Movies>, sort: MovieSort) -> Select<Movies> {
        let select = match sort {
            MovieSort::Title => select.order_by_asc(movies::Column::Title),
            MovieSort::YearDesc => select.order_by_desc(movies::Column::Year),
            MovieSort::RatingDesc => select.order_by_desc(movies::Column::Rating),
        };
        select.order_by_asc(movies::Column::Id)
    }

    /// One page of the catalog plus the total number of matches.
    pub async fn list(&self, query: &CatalogQuery) -> Result<(Vec<Movie>, u64)> {
        let filtered = Self::filtered(query);

        let page = Self::sorted(filtered.clone(), query.sort)
            .offset(query.page.offset())
            .limit(query.page.limit)
            .all(&self.conn);
        let total = filtered.count(&self.conn);

        let (rows, total) = tokio::try_join!(page, total).context("Failed to query catalog")?;

        Ok((rows.into_iter().map(Movie::from).collect(), total))
    }

    pub async fn get(&self, id: MovieId) -> Result<Option<Movie>> {
        let movie = Movies::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query movie by ID")?;

        Ok(movie.map(Movie::from))
    }

    pub async fn exists(&self, id: MovieId) -> Result<bool> {
        let count = Movies::find_by_id(id.value())
            .count(&self.conn)
            .await
            .context("Failed to check movie existence")?;

        Ok(count > 0)
    }

    pub async fn find_by_title(&self, title: &str) -> Result<Option<Movie>> {
        let movie = Movies::find()
            .filter(movies::Column::Title.eq(title))
            .one(&self.conn)
            .await
            .context("Failed to query movie by title")?;

        Ok(movie.map(Movie::from))
    }

    pub async fn create(&self, movie: &NewMovie) -> Result<Movie> {
        let genres =
            serde_json::to_string(&movie.genre).context("Failed to encode genre tags")?;

        let active = movies::ActiveModel {
            title: Set(movie.title.clone()),
            description: Set(movie.description.clone()),
            poster: Set(movie.poster.clone()),
            backdrop: Set(movie.backdrop.clone()),
            genres: Set(genres),
            year: Set(movie.year),
            rating: Set(movie.rating),
            duration: Set(movie.duration),
            created_at: Set(now_timestamp()),
            search_text: Set(search_text(&movie.title, &movie.description)),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert movie")?;

        info!(movie_id = model.id, title = %model.title, "Added movie to catalog");

        Ok(Movie::from(model))
    }

    /// Every distinct tag in the catalog, sorted.
    pub async fn genres(&self) -> Result<Vec<String>> {
        let columns: Vec<String> = Movies::find()
            .select_only()
            .column(movies::Column::Genres)
            .into_tuple()
            .all(&self.conn)
            .await
            .context("Failed to load genre tags")?;

        let tags: BTreeSet<String> = columns.iter().flat_map(|raw| decode_genres(raw)).collect();

        Ok(tags.into_iter().collect())
    }

    pub async fn summaries(&self, ids: &[i32]) -> Result<HashMap<i32, MovieSummary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Movies::find()
            .filter(movies::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await
            .context("Failed to load movie summaries")?;

        Ok(rows
            .into_iter()
            .map(|m| (m.id, MovieSummary::from(m)))
            .collect())
    }
}
