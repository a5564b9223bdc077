//! Message feed query for the polling chat client.

use super::{MessageId, MovieId, UserId};

/// Which messages a user sees when polling the feed.
///
/// Without `partner` the feed is every message the viewer sent or received.
/// `after` is an exclusive id cursor; since ids only grow, asking for
/// "everything after the last id I saw" never skips or repeats a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedQuery {
    pub viewer: UserId,
    pub movie: Option<MovieId>,
    pub partner: Option<UserId>,
    pub after: Option<MessageId>,
    pub limit: u64,
}

impl FeedQuery {
    #[must_use]
    pub const fn for_user(viewer: UserId, limit: u64) -> Self {
        Self {
            viewer,
            movie: None,
            partner: None,
            after: None,
            limit,
        }
    }

    #[must_use]
    pub const fn with_movie(mut self, movie: MovieId) -> Self {
        self.movie = Some(movie);
        self
    }

    #[must_use]
    pub const fn with_partner(mut self, partner: UserId) -> Self {
        self.partner = Some(partner);
        self
    }

    #[must_use]
    pub const fn after(mut self, cursor: MessageId) -> Self {
        self.after = Some(cursor);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_filters() {
        let q = FeedQuery::for_user(UserId::new(1), 50)
            .with_movie(MovieId::new(3))
            .with_partner(UserId::new(2))
            .after(MessageId::new(10));

        assert_eq!(q.viewer, UserId::new(1));
        assert_eq!(q.movie, Some(MovieId::new(3)));
        assert_eq!(q.partner, Some(UserId::new(2)));
        assert_eq!(q.after, Some(MessageId::new(10)));
        assert_eq!(q.limit, 50);
    }
}
