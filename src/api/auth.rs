//! Session and API key authentication.
//!
//! A request is authenticated by, in order:
//! 1. the session cookie set at register/login
//! 2. an `X-Api-Key` header
//! 3. an `Authorization: Bearer <api_key>` header
//!
//! The middleware resolves the principal once and stores it as a
//! [`CurrentUser`] request extension; handlers never look at the session.

use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, AppState, JsonBody};
use crate::domain::UserId;
use crate::models::User;
use crate::services::{AuthError, AuthSession};

pub const SESSION_USER_KEY: &str = "user_id";

/// The authenticated principal for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            AuthError::EmailTaken => Self::Conflict(err.to_string()),
            AuthError::UserNotFound => Self::Unauthorized(err.to_string()),
            AuthError::Validation(msg) => Self::validation(msg),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::internal(msg),
        }
    }
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let user = match session.get::<i32>(SESSION_USER_KEY).await {
        Ok(Some(id)) => Some(UserId::new(id)),
        _ => match extract_api_key(&headers) {
            Some(key) => match state.auth().verify_api_key(&key).await {
                Ok(user) => user.map(|u| u.id),
                Err(e) => return ApiError::from(e).into_response(),
            },
            None => None,
        },
    };

    let Some(user) = user else {
        return ApiError::unauthorized().into_response();
    };

    tracing::Span::current().record("user_id", user.value());
    request.extensions_mut().insert(CurrentUser(user));
    next.run(request).await
}

fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.trim().to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

async fn start_session(session: &Session, user: UserId) -> Result<(), ApiError> {
    // New id on privilege change.
    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to rotate session: {e}")))?;
    session
        .insert(SESSION_USER_KEY, user.value())
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthSession>), ApiError> {
    let result = state
        .auth()
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    start_session(&session, result.user.id).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<AuthSession>, ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::validation("email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("password is required"));
    }

    let result = state.auth().login(&payload.email, &payload.password).await?;

    start_session(&session, result.user.id).await?;

    Ok(Json(result))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> StatusCode {
    if let Err(e) = session.flush().await {
        tracing::warn!(error = %e, "Failed to clear session on logout");
    }
    StatusCode::NO_CONTENT
}

/// GET /auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.auth().get_user(user).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_api_key_sources() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_api_key(&headers), None);

        headers.insert("Authorization", HeaderValue::from_static("Bearer abc123"));
        assert_eq!(extract_api_key(&headers).as_deref(), Some("abc123"));

        headers.insert("X-Api-Key", HeaderValue::from_static("fromheader"));
        assert_eq!(extract_api_key(&headers).as_deref(), Some("fromheader"));
    }

    #[test]
    fn test_basic_auth_is_not_an_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert_eq!(extract_api_key(&headers), None);
    }
}
