//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::domain::{MAX_NAME_LENGTH, UserId};
use crate::models::User;
use crate::services::auth_service::{AuthError, AuthService, AuthSession};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

/// Checks signup fields before any hashing happens.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    min_password_length: usize,
) -> Result<(), AuthError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AuthError::Validation("name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AuthError::Validation(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }

    let email = email.trim();
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        return Err(AuthError::Validation("email is not valid".to_string()));
    }

    if password.chars().count() < min_password_length {
        return Err(AuthError::Validation(format!(
            "password must be at least {min_password_length} characters"
        )));
    }

    Ok(())
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        validate_registration(name, email, password, self.security.min_password_length)?;

        let (user, api_key) = self
            .store
            .create_user(name.trim(), email, password, &self.security)
            .await?
            .ok_or(AuthError::EmailTaken)?;

        info!(user_id = %user.id, "Registered new user");

        Ok(AuthSession { user, api_key })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let (user, api_key) = self
            .store
            .verify_credentials(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(AuthSession { user, api_key })
    }

    async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>, AuthError> {
        Ok(self.store.verify_api_key(api_key).await?)
    }

    async fn get_user(&self, id: UserId) -> Result<User, AuthError> {
        self.store
            .get_user(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
