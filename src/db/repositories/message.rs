use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::{FeedQuery, MovieId, UserId, now_timestamp};
use crate::entities::{messages, prelude::*};
use crate::models::Message;

pub struct MessageRepository {
    conn: DatabaseConnection,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn scope(query: &FeedQuery) -> Condition {
        let viewer = query.viewer.value();

        match query.partner {
            Some(partner) => {
                let partner = partner.value();
                Condition::any()
                    .add(
                        Condition::all()
                            .add(messages::Column::SenderId.eq(viewer))
                            .add(messages::Column::ReceiverId.eq(partner)),
                    )
                    .add(
                        Condition::all()
                            .add(messages::Column::SenderId.eq(partner))
                            .add(messages::Column::ReceiverId.eq(viewer)),
                    )
            }
            None => Condition::any()
                .add(messages::Column::SenderId.eq(viewer))
                .add(messages::Column::ReceiverId.eq(viewer)),
        }
    }

    /// Messages visible to the viewer, oldest first.
    ///
    /// Ordered by id alone: ids follow insert order, and `created_at` is
    /// stamped before the insert, so concurrent sends can disagree with it.
    /// The `after` cursor is an id, so this order is the one it pages through.
    pub async fn feed(&self, query: &FeedQuery) -> Result<Vec<Message>> {
        let mut select = Messages::find().filter(Self::scope(query));

        if let Some(movie) = query.movie {
            select = select.filter(messages::Column::MovieId.eq(movie.value()));
        }
        if let Some(after) = query.after {
            select = select.filter(messages::Column::Id.gt(after.value()));
        }

        let rows = select
            .order_by_asc(messages::Column::Id)
            .limit(query.limit)
            .all(&self.conn)
            .await
            .context("Failed to query message feed")?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    pub async fn create(
        &self,
        sender: UserId,
        receiver: UserId,
        movie: Option<MovieId>,
        content: &str,
    ) -> Result<Message> {
        let active = messages::ActiveModel {
            content: Set(content.to_string()),
            sender_id: Set(sender.value()),
            receiver_id: Set(receiver.value()),
            movie_id: Set(movie.map(|m| m.value())),
            created_at: Set(now_timestamp()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert message")?;

        Ok(Message::from(model))
    }

    pub async fn recent_sent(&self, sender: UserId, limit: u64) -> Result<Vec<Message>> {
        let rows = Messages::find()
            .filter(messages::Column::SenderId.eq(sender.value()))
            .order_by_desc(messages::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list sent messages")?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    pub async fn count_sent(&self, sender: UserId) -> Result<u64> {
        Messages::find()
            .filter(messages::Column::SenderId.eq(sender.value()))
            .count(&self.conn)
            .await
            .context("Failed to count sent messages")
    }
}
