//! Domain service for the polling chat feed.

use thiserror::Error;

use crate::domain::{FeedQuery, MovieId, UserId};
use crate::models::EnrichedMessage;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Receiver not found: {0}")]
    ReceiverNotFound(UserId),

    #[error("Movie not found: {0}")]
    MovieNotFound(MovieId),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for MessageError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MessageError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A message as submitted by its sender.
#[derive(Debug, Clone)]
pub struct SendMessage {
    pub content: String,
    pub receiver: UserId,
    pub movie: Option<MovieId>,
}

#[async_trait::async_trait]
pub trait MessageService: Send + Sync {
    /// Messages the viewer sent or received, narrowed by the query filters,
    /// oldest first.
    async fn feed(&self, query: &FeedQuery) -> Result<Vec<EnrichedMessage>, MessageError>;

    /// Stores a message from `sender` and returns it enriched.
    ///
    /// # Errors
    ///
    /// - [`MessageError::Validation`] for blank content or a message to self
    /// - [`MessageError::ReceiverNotFound`] / [`MessageError::MovieNotFound`]
    ///   for dangling references
    async fn send(
        &self,
        sender: UserId,
        message: SendMessage,
    ) -> Result<EnrichedMessage, MessageError>;
}
