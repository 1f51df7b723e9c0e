//! Project Depot - Main Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use project_depot_backend::{
    api::{self, routes},
    config::Config,
    db,
    error::Result,
    storage::{FilesystemStorage, StorageBackend},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "project_depot_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Starting Project Depot");

    // Connect to database
    let db_pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Connected to database");

    // Run migrations
    db::MIGRATOR.run(&db_pool).await?;
    tracing::info!("Database migrations complete");

    // Ensure the upload directory exists before the first request needs it
    tokio::fs::create_dir_all(&config.storage_path).await?;
    let storage: Arc<dyn StorageBackend> = Arc::new(FilesystemStorage::new(&config.storage_path));
    tracing::info!("Storing uploads under {}", config.storage_path);

    // Build router
    let cors = routes::cors_layer(&config)?;
    let state = Arc::new(api::AppState::new(config.clone(), db_pool, storage));
    let app = routes::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config.bind_address.parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
