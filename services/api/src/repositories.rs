//! User persistence seam
//!
//! The registration pipeline talks to a [`UserStore`] trait object so the
//! pipeline's behavior can be exercised without a database; [`PgUserStore`]
//! is the production implementation.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::user::{NewUser, PublicUser, UserRecord};

pub mod user;

pub use user::PgUserStore;

/// Failure surface of a user store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint on username or email rejected the write. The
    /// users table enforces uniqueness even when a concurrent registration
    /// slips between the duplicate check and the create.
    #[error("duplicate username or email")]
    Duplicate,

    /// Anything else the backend failed on.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Persistence operations the registration pipeline needs.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a record whose username or email matches.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Persist a new user and return the stored record.
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, StoreError>;

    /// Load a record by id through the sanitized projection; password and
    /// refresh token columns are never read.
    async fn find_public_by_id(&self, id: Uuid) -> Result<Option<PublicUser>, StoreError>;
}
