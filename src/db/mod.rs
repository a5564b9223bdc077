use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::info;

use crate::config::SecurityConfig;
use crate::domain::{CatalogQuery, FeedQuery, MovieId, UserId};
use crate::models::{
    Favorite, FavoriteWithMovie, Message, Movie, MovieSummary, NewMovie, User, UserContact,
    UserSummary, WatchActivity, WatchEntry,
};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:") || db_url.contains("mode=memory");
        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:")
                .split('?')
                .next()
                .unwrap_or_default();
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !path_str.is_empty() && !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    fn watch_history_repo(&self) -> repositories::watch_history::WatchHistoryRepository {
        repositories::watch_history::WatchHistoryRepository::new(self.conn.clone())
    }

    fn message_repo(&self) -> repositories::message::MessageRepository {
        repositories::message::MessageRepository::new(self.conn.clone())
    }

    // Users

    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<Option<(User, String)>> {
        self.user_repo().create(name, email, password, config).await
    }

    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<(User, String)>> {
        self.user_repo().verify_credentials(email, password).await
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn user_exists(&self, id: UserId) -> Result<bool> {
        self.user_repo().exists(id).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn update_profile(
        &self,
        id: UserId,
        name: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<Option<UserContact>> {
        self.user_repo().update_profile(id, name, avatar).await
    }

    pub async fn list_other_users(&self, id: UserId) -> Result<Vec<UserContact>> {
        self.user_repo().list_others(id).await
    }

    pub async fn user_summaries(&self, ids: &[i32]) -> Result<HashMap<i32, UserSummary>> {
        self.user_repo().summaries(ids).await
    }

    // Movies

    pub async fn list_movies(&self, query: &CatalogQuery) -> Result<(Vec<Movie>, u64)> {
        self.movie_repo().list(query).await
    }

    pub async fn get_movie(&self, id: MovieId) -> Result<Option<Movie>> {
        self.movie_repo().get(id).await
    }

    pub async fn movie_exists(&self, id: MovieId) -> Result<bool> {
        self.movie_repo().exists(id).await
    }

    pub async fn find_movie_by_title(&self, title: &str) -> Result<Option<Movie>> {
        self.movie_repo().find_by_title(title).await
    }

    pub async fn create_movie(&self, movie: &NewMovie) -> Result<Movie> {
        self.movie_repo().create(movie).await
    }

    pub async fn list_genres(&self) -> Result<Vec<String>> {
        self.movie_repo().genres().await
    }

    pub async fn movie_summaries(&self, ids: &[i32]) -> Result<HashMap<i32, MovieSummary>> {
        self.movie_repo().summaries(ids).await
    }

    // Favorites

    pub async fn toggle_favorite(&self, user: UserId, movie: MovieId) -> Result<bool> {
        self.favorite_repo().toggle(user, movie).await
    }

    pub async fn favorite_movies(&self, user: UserId) -> Result<Vec<Movie>> {
        self.favorite_repo().movies_for_user(user).await
    }

    pub async fn recent_favorites(
        &self,
        user: UserId,
        limit: u64,
    ) -> Result<Vec<FavoriteWithMovie>> {
        self.favorite_repo().recent_for_user(user, limit).await
    }

    pub async fn favorites_for_movie(&self, movie: MovieId) -> Result<Vec<Favorite>> {
        self.favorite_repo().for_movie(movie).await
    }

    pub async fn count_favorites(&self, user: UserId) -> Result<u64> {
        self.favorite_repo().count_for_user(user).await
    }

    // Watch history

    pub async fn record_watch(&self, user: UserId, movie: MovieId) -> Result<WatchEntry> {
        self.watch_history_repo().record(user, movie).await
    }

    pub async fn recent_watch_history(
        &self,
        user: UserId,
        limit: u64,
    ) -> Result<Vec<WatchActivity>> {
        self.watch_history_repo()
            .recent_for_user(user, limit)
            .await
    }

    pub async fn watch_history_for_movie(&self, movie: MovieId) -> Result<Vec<WatchEntry>> {
        self.watch_history_repo().for_movie(movie).await
    }

    pub async fn count_watch_history(&self, user: UserId) -> Result<u64> {
        self.watch_history_repo().count_for_user(user).await
    }

    // Messages

    pub async fn message_feed(&self, query: &FeedQuery) -> Result<Vec<Message>> {
        self.message_repo().feed(query).await
    }

    pub async fn create_message(
        &self,
        sender: UserId,
        receiver: UserId,
        movie: Option<MovieId>,
        content: &str,
    ) -> Result<Message> {
        self.message_repo()
            .create(sender, receiver, movie, content)
            .await
    }

    pub async fn recent_sent_messages(&self, sender: UserId, limit: u64) -> Result<Vec<Message>> {
        self.message_repo().recent_sent(sender, limit).await
    }

    pub async fn count_sent_messages(&self, sender: UserId) -> Result<u64> {
        self.message_repo().count_sent(sender).await
    }
}
