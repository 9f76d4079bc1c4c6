//! Postgres-backed user store

use anyhow::anyhow;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::user::{NewUser, PublicUser, UserRecord};
use crate::repositories::{StoreError, UserStore};

/// User store over a PostgreSQL pool.
///
/// Owns the storage mechanics the pipeline stays ignorant of: passwords are
/// hashed with Argon2 before they touch a row, and the unique constraints on
/// username and email are translated into [`StoreError::Duplicate`].
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn hash_password(password: &str) -> Result<String, StoreError> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }
}

fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate;
        }
    }
    StoreError::Backend(err.into())
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, full_name, password_hash,
                   avatar_url, cover_image_url, refresh_token,
                   created_at, updated_at
            FROM users
            WHERE username = $1 OR email = $2
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        Ok(record)
    }

    async fn create(&self, new_user: NewUser) -> Result<UserRecord, StoreError> {
        info!(username = %new_user.username, "creating user record");

        let password_hash = Self::hash_password(&new_user.password)?;

        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, email, full_name, password_hash,
                               avatar_url, cover_image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, email, full_name, password_hash,
                      avatar_url, cover_image_url, refresh_token,
                      created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.full_name)
        .bind(&password_hash)
        .bind(&new_user.avatar_url)
        .bind(&new_user.cover_image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(record)
    }

    async fn find_public_by_id(&self, id: Uuid) -> Result<Option<PublicUser>, StoreError> {
        let record = sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT id, username, email, full_name,
                   avatar_url, cover_image_url,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        Ok(record)
    }
}
