//! Integration test for the PostgreSQL plumbing
//!
//! Needs a reachable database, so it is opt-in:
//! `DATABASE_URL=... cargo test -p common -- --ignored`

use common::database::{DatabaseConfig, health_check, init_pool};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires a local PostgreSQL instance"]
async fn pool_connects_and_answers_queries() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    let row = sqlx::query("SELECT 1 as result").fetch_one(&pool).await?;
    let result: i32 = row.get("result");
    assert_eq!(result, 1, "PostgreSQL simple query test failed");

    Ok(())
}
