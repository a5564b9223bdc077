use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::{MovieId, UserId, now_timestamp};
use crate::entities::{prelude::*, watch_history};
use crate::models::{Movie, WatchActivity, WatchEntry};

/// Append-only log of watch events.
pub struct WatchHistoryRepository {
    conn: DatabaseConnection,
}

impl WatchHistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn record(&self, user: UserId, movie: MovieId) -> Result<WatchEntry> {
        let active = watch_history::ActiveModel {
            user_id: Set(user.value()),
            movie_id: Set(movie.value()),
            watched_at: Set(now_timestamp()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to record watch event")?;

        Ok(WatchEntry::from(model))
    }

    /// Latest watch events first, each joined with its movie.
    pub async fn recent_for_user(&self, user: UserId, limit: u64) -> Result<Vec<WatchActivity>> {
        let rows = WatchHistory::find()
            .filter(watch_history::Column::UserId.eq(user.value()))
            .order_by_desc(watch_history::Column::WatchedAt)
            .order_by_desc(watch_history::Column::Id)
            .limit(limit)
            .find_also_related(Movies)
            .all(&self.conn)
            .await
            .context("Failed to list recent watch history")?;

        Ok(rows
            .into_iter()
            .filter_map(|(entry, movie)| {
                movie.map(|m| WatchActivity {
                    entry: WatchEntry::from(entry),
                    movie: Movie::from(m),
                })
            })
            .collect())
    }

    pub async fn for_movie(&self, movie: MovieId) -> Result<Vec<WatchEntry>> {
        let rows = WatchHistory::find()
            .filter(watch_history::Column::MovieId.eq(movie.value()))
            .order_by_desc(watch_history::Column::WatchedAt)
            .all(&self.conn)
            .await
            .context("Failed to list watch history for movie")?;

        Ok(rows.into_iter().map(WatchEntry::from).collect())
    }

    pub async fn count_for_user(&self, user: UserId) -> Result<u64> {
        WatchHistory::find()
            .filter(watch_history::Column::UserId.eq(user.value()))
            .count(&self.conn)
            .await
            .context("Failed to count watch history")
    }
}
