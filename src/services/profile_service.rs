//! Domain service for the signed-in user's own data: profile, stats, watch
//! history and the chat partner list.

use thiserror::Error;

use crate::domain::{MovieId, UserId};
use crate::models::{Profile, Stats, UserContact, WatchActivity};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Movie not found: {0}")]
    MovieNotFound(MovieId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ProfileError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ProfileError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Requested profile changes. `None` and empty strings leave the field as is.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[async_trait::async_trait]
pub trait ProfileService: Send + Sync {
    /// The user with their latest favorites, watch history and sent messages.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::UserNotFound`] if the account is gone.
    async fn get_profile(&self, user: UserId) -> Result<Profile, ProfileError>;

    async fn update_profile(
        &self,
        user: UserId,
        update: ProfileUpdate,
    ) -> Result<UserContact, ProfileError>;

    /// Counts plus the five latest watch events. The reads are not taken
    /// from a single snapshot.
    async fn stats(&self, user: UserId) -> Result<Stats, ProfileError>;

    /// Appends a watch event at the current time.
    async fn record_watch(&self, user: UserId, movie: MovieId)
    -> Result<WatchActivity, ProfileError>;

    /// Everyone the user could chat with.
    async fn contacts(&self, user: UserId) -> Result<Vec<UserContact>, ProfileError>;
}
