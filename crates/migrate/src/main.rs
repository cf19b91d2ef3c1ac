use elearn_core::storage::StorageConfig;
use elearn_db::DbConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "elearn_migrate=debug,elearn_db=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DbConfig::from_env().expect("Invalid database configuration");

    let pool = elearn_db::create_pool(&config)
        .await
        .expect("Failed to connect to database");
    tracing::info!(max_connections = config.max_connections, "Database connection pool created");

    elearn_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    elearn_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let storage = StorageConfig::from_env();
    tokio::fs::create_dir_all(&storage.media_root)
        .await
        .expect("Failed to create media root");
    tracing::info!(media_root = %storage.media_root.display(), "Media root ready");
}
