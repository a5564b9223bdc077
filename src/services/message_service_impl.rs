//! `SeaORM` implementation of the `MessageService` trait.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::db::Store;
use crate::domain::{FeedQuery, UserId};
use crate::models::{EnrichedMessage, Message};
use crate::services::message_service::{MessageError, MessageService, SendMessage};

pub struct SeaOrmMessageService {
    store: Store,
}

impl SeaOrmMessageService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Attaches participant and movie summaries using one query per table.
    async fn enrich(&self, messages: Vec<Message>) -> Result<Vec<EnrichedMessage>, MessageError> {
        if messages.is_empty() {
            return Ok(Vec::new());
        }

        let mut user_ids: Vec<i32> = messages
            .iter()
            .flat_map(|m| [m.sender_id.value(), m.receiver_id.value()])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let mut movie_ids: Vec<i32> = messages
            .iter()
            .filter_map(|m| m.movie_id.map(|id| id.value()))
            .collect();
        movie_ids.sort_unstable();
        movie_ids.dedup();

        let (users, movies) = tokio::try_join!(
            self.store.user_summaries(&user_ids),
            self.store.movie_summaries(&movie_ids),
        )?;

        Ok(messages
            .into_iter()
            .filter_map(|message| {
                let sender = users.get(&message.sender_id.value()).cloned();
                let receiver = users.get(&message.receiver_id.value()).cloned();
                let (Some(sender), Some(receiver)) = (sender, receiver) else {
                    warn!(message_id = %message.id, "Skipping message with missing participant");
                    return None;
                };
                let movie = message
                    .movie_id
                    .and_then(|id| movies.get(&id.value()).cloned());

                Some(EnrichedMessage {
                    message,
                    sender,
                    receiver,
                    movie,
                })
            })
            .collect())
    }
}

#[async_trait]
impl MessageService for SeaOrmMessageService {
    async fn feed(&self, query: &FeedQuery) -> Result<Vec<EnrichedMessage>, MessageError> {
        let messages = self.store.message_feed(query).await?;
        self.enrich(messages).await
    }

    async fn send(
        &self,
        sender: UserId,
        message: SendMessage,
    ) -> Result<EnrichedMessage, MessageError> {
        let content = message.content.trim();
        if content.is_empty() {
            return Err(MessageError::Validation(
                "content must not be empty".to_string(),
            ));
        }

        if message.receiver == sender {
            return Err(MessageError::Validation(
                "cannot send a message to yourself".to_string(),
            ));
        }

        if !self.store.user_exists(message.receiver).await? {
            return Err(MessageError::ReceiverNotFound(message.receiver));
        }

        if let Some(movie) = message.movie {
            if !self.store.movie_exists(movie).await? {
                return Err(MessageError::MovieNotFound(movie));
            }
        }

        let stored = self
            .store
            .create_message(sender, message.receiver, message.movie, content)
            .await?;

        metrics::counter!("messages_sent_total").increment(1);
        debug!(
            message_id = %stored.id,
            sender_id = %sender,
            receiver_id = %message.receiver,
            "Message sent"
        );

        self.enrich(vec![stored])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| MessageError::Internal("Sent message vanished".to_string()))
    }
}
