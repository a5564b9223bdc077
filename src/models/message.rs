use serde::Serialize;

use super::{MovieSummary, UserSummary};
use crate::domain::{MessageId, MovieId, UserId};
use crate::entities::messages;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub movie_id: Option<MovieId>,
    pub created_at: String,
}

impl From<messages::Model> for Message {
    fn from(model: messages::Model) -> Self {
        Self {
            id: MessageId::new(model.id),
            content: model.content,
            sender_id: UserId::new(model.sender_id),
            receiver_id: UserId::new(model.receiver_id),
            movie_id: model.movie_id.map(MovieId::new),
            created_at: model.created_at,
        }
    }
}

/// A message joined with summaries of both participants and the
/// suggested movie, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedMessage {
    #[serde(flatten)]
    pub message: Message,
    pub sender: UserSummary,
    pub receiver: UserSummary,
    pub movie: Option<MovieSummary>,
}
