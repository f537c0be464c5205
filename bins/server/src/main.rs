//! Message board server.
//!
//! Main entry point for the image message board.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use msgcreator_api::{AppState, create_router};
use msgcreator_core::cdn::CdnUrlBuilder;
use msgcreator_core::storage::StorageService;
use msgcreator_db::{MessageRepository, connect};
use msgcreator_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "msgcreator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(
        host = %config.database.host,
        database = %config.database.name,
        "Connected to database"
    );
    let messages = MessageRepository::new(db).with_timeouts(
        config.database.read_timeout(),
        config.database.write_timeout(),
    );

    // Object storage
    let storage = StorageService::from_provider(config.storage.clone())
        .context("Failed to initialize object storage")?;
    info!(
        provider = storage.provider_name(),
        bucket = %storage.bucket(),
        "Object storage configured"
    );

    // Public image URLs
    let cdn = CdnUrlBuilder::new(config.cdn.domain.clone());
    if !cdn.is_configured() {
        warn!("CLOUDFRONT_DOMAIN is not set; image URLs will be unavailable");
    }

    // Create application state
    let state = AppState {
        messages: Arc::new(messages),
        storage: Arc::new(storage),
        cdn: Arc::new(cdn),
    };

    // Create router
    let app = create_router(state, &config.server);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
