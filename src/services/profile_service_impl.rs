//! `SeaORM` implementation of the `ProfileService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::domain::{MAX_NAME_LENGTH, MovieId, UserId};
use crate::models::{Profile, Stats, UserContact, WatchActivity};
use crate::services::profile_service::{ProfileError, ProfileService, ProfileUpdate};

pub const PROFILE_FAVORITES: u64 = 10;
pub const PROFILE_WATCH_HISTORY: u64 = 10;
pub const PROFILE_SENT_MESSAGES: u64 = 5;
pub const STATS_RECENT_ACTIVITY: u64 = 5;

pub struct SeaOrmProfileService {
    store: Store,
}

impl SeaOrmProfileService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl ProfileService for SeaOrmProfileService {
    async fn get_profile(&self, user: UserId) -> Result<Profile, ProfileError> {
        let account = self
            .store
            .get_user(user)
            .await?
            .ok_or(ProfileError::UserNotFound(user))?;

        let (favorites, watch_history, sent_messages) = tokio::try_join!(
            self.store.recent_favorites(user, PROFILE_FAVORITES),
            self.store.recent_watch_history(user, PROFILE_WATCH_HISTORY),
            self.store.recent_sent_messages(user, PROFILE_SENT_MESSAGES),
        )?;

        Ok(Profile {
            user: account,
            favorites,
            watch_history,
            sent_messages,
        })
    }

    async fn update_profile(
        &self,
        user: UserId,
        update: ProfileUpdate,
    ) -> Result<UserContact, ProfileError> {
        let name = non_empty(update.name.as_deref());
        let avatar = non_empty(update.avatar.as_deref());

        if let Some(name) = name {
            if name.chars().count() > MAX_NAME_LENGTH {
                return Err(ProfileError::Validation(format!(
                    "name must be at most {MAX_NAME_LENGTH} characters"
                )));
            }
        }

        self.store
            .update_profile(user, name, avatar)
            .await?
            .ok_or(ProfileError::UserNotFound(user))
    }

    async fn stats(&self, user: UserId) -> Result<Stats, ProfileError> {
        let (favorites_count, watch_history_count, messages_count, recent_activity) = tokio::try_join!(
            self.store.count_favorites(user),
            self.store.count_watch_history(user),
            self.store.count_sent_messages(user),
            self.store.recent_watch_history(user, STATS_RECENT_ACTIVITY),
        )?;

        Ok(Stats {
            favorites_count,
            watch_history_count,
            messages_count,
            recent_activity,
        })
    }

    async fn record_watch(
        &self,
        user: UserId,
        movie: MovieId,
    ) -> Result<WatchActivity, ProfileError> {
        let Some(details) = self.store.get_movie(movie).await? else {
            return Err(ProfileError::MovieNotFound(movie));
        };

        let entry = self.store.record_watch(user, movie).await?;

        Ok(WatchActivity {
            entry,
            movie: details,
        })
    }

    async fn contacts(&self, user: UserId) -> Result<Vec<UserContact>, ProfileError> {
        Ok(self.store.list_other_users(user).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_treats_blank_as_absent() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(Some(" Ada ")), Some("Ada"));
    }
}
