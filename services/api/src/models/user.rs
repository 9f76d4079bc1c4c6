//! User records and their public projection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Persistent user entity as held by the user store.
///
/// Deliberately not serializable: `password_hash` and `refresh_token` must
/// never leave the service, so anything crossing the wire goes through
/// [`PublicUser`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub avatar_url: String,
    pub cover_image_url: String,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload handed to a user store.
///
/// `password` is still plaintext here; turning it into `password_hash` is the
/// store's job.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub avatar_url: String,
    pub cover_image_url: String,
}

/// The user fields safe to expose: a [`UserRecord`] minus credentials.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for PublicUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            full_name: record.full_name,
            avatar_url: record.avatar_url,
            cover_image_url: record.cover_image_url,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_record() -> UserRecord {
        let now = Utc::now();
        UserRecord {
            id: Uuid::new_v4(),
            username: "riley".to_string(),
            email: "riley@clipstream.dev".to_string(),
            full_name: "Riley Park".to_string(),
            password_hash: "$argon2id$...".to_string(),
            avatar_url: "https://cdn.clipstream.dev/media/a.png".to_string(),
            cover_image_url: String::new(),
            refresh_token: Some("opaque".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn public_projection_keeps_profile_fields() {
        let record = sample_record();
        let id = record.id;

        let public = PublicUser::from(record);
        assert_eq!(public.id, id);
        assert_eq!(public.username, "riley");
        assert_eq!(public.cover_image_url, "");
    }

    #[test]
    fn public_projection_serializes_camel_case_without_credentials() {
        let public = PublicUser::from(sample_record());
        let body = serde_json::to_value(&public).expect("serialize public user");
        let object = body.as_object().expect("json object");

        assert!(object.contains_key("fullName"));
        assert!(object.contains_key("avatarUrl"));
        assert!(object.contains_key("coverImageUrl"));
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("passwordHash"));
        assert!(!object.contains_key("refreshToken"));
    }
}
