use std::collections::HashMap;

use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use tokio::task;

use crate::config::SecurityConfig;
use crate::domain::{UserId, now_timestamp};
use crate::entities::{prelude::*, users};
use crate::models::{User, UserContact, UserSummary};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Creates an account and returns it with its freshly generated API key.
    ///
    /// Returns `Ok(None)` when the email is already registered.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<Option<(User, String)>> {
        let password = password.to_string();
        let config = config.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        let now = now_timestamp();
        let active = users::ActiveModel {
            name: Set(name.to_string()),
            email: Set(normalize_email(email)),
            avatar: Set(None),
            password_hash: Set(password_hash),
            api_key: Set(generate_api_key()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        match active.insert(&self.conn).await {
            Ok(model) => {
                let api_key = model.api_key.clone();
                Ok(Some((User::from(model), api_key)))
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(None)
            }
            Err(e) => Err(e).context("Failed to insert user"),
        }
    }

    /// Checks an email/password pair. Returns the user and API key on success.
    ///
    /// Argon2 verification runs in `spawn_blocking` so it does not stall the
    /// runtime.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<(User, String)>> {
        let user = Users::find()
            .filter(users::Column::Email.eq(normalize_email(email)))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let Some(user) = user else {
            return Ok(None);
        };

        let password_hash = user.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        if !is_valid {
            return Ok(None);
        }

        let api_key = user.api_key.clone();
        Ok(Some((User::from(user), api_key)))
    }

    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>> {
        let user = Users::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn exists(&self, id: UserId) -> Result<bool> {
        Ok(self.get_by_id(id).await?.is_some())
    }

    /// Verify API key and return the associated user
    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        let user = Users::find()
            .filter(users::Column::ApiKey.eq(api_key))
            .one(&self.conn)
            .await
            .context("Failed to query user by API key")?;

        Ok(user.map(User::from))
    }

    /// Applies the given fields; `None` leaves the column untouched.
    pub async fn update_profile(
        &self,
        id: UserId,
        name: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<Option<UserContact>> {
        let Some(user) = Users::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user for profile update")?
        else {
            return Ok(None);
        };

        if name.is_none() && avatar.is_none() {
            return Ok(Some(UserContact::from(user)));
        }

        let mut active: users::ActiveModel = user.into();
        if let Some(name) = name {
            active.name = Set(name.to_string());
        }
        if let Some(avatar) = avatar {
            active.avatar = Set(Some(avatar.to_string()));
        }
        active.updated_at = Set(now_timestamp());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update user profile")?;

        Ok(Some(UserContact::from(updated)))
    }

    /// Everyone except `id`, ordered by name.
    pub async fn list_others(&self, id: UserId) -> Result<Vec<UserContact>> {
        let rows = Users::find()
            .filter(users::Column::Id.ne(id.value()))
            .order_by_asc(users::Column::Name)
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(rows.into_iter().map(UserContact::from).collect())
    }

    /// Sender/receiver projections keyed by id, fetched in one query.
    pub async fn summaries(&self, ids: &[i32]) -> Result<HashMap<i32, UserSummary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Users::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await
            .context("Failed to load user summaries")?;

        Ok(rows
            .into_iter()
            .map(|u| (u.id, UserSummary::from(u)))
            .collect())
    }
}

#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the argon2 crate defaults.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Generate a random API key (64 character hex string)
#[must_use]
pub fn generate_api_key() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
