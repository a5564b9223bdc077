use serde::Serialize;

use super::{Message, Movie, User};
use crate::domain::{MovieId, UserId};
use crate::entities::{favorites, watch_history};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i32,
    pub user_id: UserId,
    pub movie_id: MovieId,
}

impl From<favorites::Model> for Favorite {
    fn from(model: favorites::Model) -> Self {
        Self {
            id: model.id,
            user_id: UserId::new(model.user_id),
            movie_id: MovieId::new(model.movie_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteWithMovie {
    #[serde(flatten)]
    pub favorite: Favorite,
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchEntry {
    pub id: i32,
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub watched_at: String,
}

impl From<watch_history::Model> for WatchEntry {
    fn from(model: watch_history::Model) -> Self {
        Self {
            id: model.id,
            user_id: UserId::new(model.user_id),
            movie_id: MovieId::new(model.movie_id),
            watched_at: model.watched_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchActivity {
    #[serde(flatten)]
    pub entry: WatchEntry,
    pub movie: Movie,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(flatten)]
    pub user: User,
    pub favorites: Vec<FavoriteWithMovie>,
    pub watch_history: Vec<WatchActivity>,
    pub sent_messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub favorites_count: u64,
    pub watch_history_count: u64,
    pub messages_count: u64,
    pub recent_activity: Vec<WatchActivity>,
}
