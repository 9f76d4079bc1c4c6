//! Live-PostgreSQL round-trip for the user store
//!
//! Needs a reachable database with the users migration applied, so it is
//! opt-in: `DATABASE_URL=... cargo test -p api -- --ignored`

use api::models::user::NewUser;
use api::repositories::{PgUserStore, StoreError, UserStore};
use common::database::{DatabaseConfig, init_pool};
use uuid::Uuid;

fn unique_user() -> NewUser {
    let tag = Uuid::new_v4().simple().to_string();
    NewUser {
        username: format!("user_{tag}"),
        email: format!("{tag}@clipstream.dev"),
        full_name: "Round Trip".to_string(),
        password: "correct horse".to_string(),
        avatar_url: "https://cdn.clipstream.dev/media/a.png".to_string(),
        cover_image_url: String::new(),
    }
}

#[tokio::test]
#[ignore = "requires a local PostgreSQL instance with migrations applied"]
async fn create_find_and_project_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;
    let store = PgUserStore::new(pool);

    let new_user = unique_user();
    let username = new_user.username.clone();
    let email = new_user.email.clone();

    let record = store.create(new_user).await?;
    assert_eq!(record.username, username);
    assert_ne!(record.password_hash, "correct horse", "password is hashed");

    let found = store
        .find_by_username_or_email(&username, "nobody@clipstream.dev")
        .await?
        .expect("lookup by username");
    assert_eq!(found.id, record.id);

    let found = store
        .find_by_username_or_email("nobody", &email)
        .await?
        .expect("lookup by email");
    assert_eq!(found.id, record.id);

    let public = store
        .find_public_by_id(record.id)
        .await?
        .expect("sanitized projection");
    assert_eq!(public.username, username);
    assert_eq!(public.cover_image_url, "");

    Ok(())
}

#[tokio::test]
#[ignore = "requires a local PostgreSQL instance with migrations applied"]
async fn unique_violation_maps_to_duplicate() -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;
    let store = PgUserStore::new(pool);

    let first = unique_user();
    let mut second = first.clone();
    second.email = format!("{}@clipstream.dev", Uuid::new_v4().simple());

    store.create(first).await?;
    let err = store.create(second).await.unwrap_err();

    assert!(matches!(err, StoreError::Duplicate));
    Ok(())
}
