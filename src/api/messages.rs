//! Chat feed endpoints. Clients poll `GET /api/messages`, passing the id of
//! the newest message they hold as `after`.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{optional_id, require_id, require_text};
use super::{ApiError, AppState, JsonBody};
use crate::domain::{FeedQuery, MessageId, MovieId, UserId, parse_optional_id, parse_positive_or};
use crate::models::EnrichedMessage;
use crate::services::{MessageError, SendMessage};

impl From<MessageError> for ApiError {
    fn from(err: MessageError) -> Self {
        match err {
            MessageError::Validation(msg) => Self::validation(msg),
            MessageError::ReceiverNotFound(id) => Self::not_found("User", id),
            MessageError::MovieNotFound(id) => Self::not_found("Movie", id),
            MessageError::Database(msg) => Self::DatabaseError(msg),
            MessageError::Internal(msg) => Self::internal(msg),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedParams {
    pub movie_id: Option<String>,
    pub with: Option<String>,
    pub after: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: Option<String>,
    pub receiver_id: Option<i32>,
    pub movie_id: Option<i32>,
}

/// `GET /api/messages?movieId=&with=&after=&limit=`
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<FeedParams>,
) -> Result<Json<Vec<EnrichedMessage>>, ApiError> {
    let limits = &state.config().messages;
    let limit = parse_positive_or(params.limit.as_deref(), limits.default_limit).min(limits.max_limit);

    let mut query = FeedQuery::for_user(user, limit);
    if let Some(movie) = parse_optional_id(params.movie_id.as_deref()) {
        query = query.with_movie(MovieId::new(movie));
    }
    if let Some(partner) = parse_optional_id(params.with.as_deref()) {
        query = query.with_partner(UserId::new(partner));
    }
    if let Some(after) = parse_optional_id(params.after.as_deref()) {
        query = query.after(MessageId::new(after));
    }

    Ok(Json(state.messages().feed(&query).await?))
}

/// `POST /api/messages`
///
/// Body `{content, receiverId, movieId?}`; the sender is always the caller.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<SendMessageRequest>,
) -> Result<Json<EnrichedMessage>, ApiError> {
    let content = require_text(payload.content.as_deref(), "content")?;
    let receiver = require_id(payload.receiver_id, "receiverId")?;
    let movie = optional_id(payload.movie_id, "movieId")?;

    let message = SendMessage {
        content: content.to_string(),
        receiver: UserId::new(receiver),
        movie: movie.map(MovieId::new),
    };

    Ok(Json(state.messages().send(user, message).await?))
}
