use serde::Serialize;

use crate::domain::UserId;
use crate::entities::users;

/// Account data that is safe to return to its owner (no hash, no API key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            name: model.name,
            email: model.email,
            avatar: model.avatar,
            created_at: model.created_at,
        }
    }
}

/// Public card shown in the chat partner list and after a profile update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContact {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl From<users::Model> for UserContact {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            name: model.name,
            email: model.email,
            avatar: model.avatar,
        }
    }
}

/// Sender/receiver projection attached to chat messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub avatar: Option<String>,
}

impl From<users::Model> for UserSummary {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            name: model.name,
            avatar: model.avatar,
        }
    }
}
