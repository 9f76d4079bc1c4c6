use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::config::{MediaConfig, ServerConfig};
use api::media::{MediaUploader, S3MediaStore};
use api::repositories::PgUserStore;
use api::routes::create_router;
use api::state::AppState;
use common::database::{DatabaseConfig, health_check, init_pool};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("starting clipstream API service");

    let server_config = ServerConfig::from_env();
    let media_config = MediaConfig::from_env();

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("database connection successful");
    } else {
        anyhow::bail!("failed to connect to database");
    }

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let s3_client = aws_sdk_s3::Client::new(&aws_config);

    let state = AppState {
        user_store: Arc::new(PgUserStore::new(pool)),
        media: MediaUploader::new(Arc::new(S3MediaStore::new(s3_client, media_config))),
    };

    let app = create_router(state, server_config.max_upload_bytes);

    let listener = TcpListener::bind(&server_config.bind_addr).await?;
    info!(addr = %server_config.bind_addr, "API service listening");

    axum::serve(listener, app).await?;

    Ok(())
}
