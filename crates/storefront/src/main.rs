use anyhow::{Context, Result};
use shared::{
    config::{Config, ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use storefront::{handler::AppRouter, state::AppState};
use tracing::{error, info};

const SERVICE_NAME: &str = "storefront";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let mut telemetry = Telemetry::new(SERVICE_NAME, config.otel_endpoint.clone());
    let logger_provider = telemetry
        .init_logger()
        .context("Failed to init OTLP logger")?;
    telemetry
        .init_meter()
        .context("Failed to init OTLP meter")?;
    telemetry
        .init_tracer()
        .context("Failed to init OTLP tracer")?;

    init_logger(
        logger_provider,
        SERVICE_NAME,
        config.is_dev,
        config.enable_file_log,
    );

    info!("🚀 Starting Storefront initialization...");

    let db_pool = ConnectionManager::new_pool(&config.database_url, config.db_max_conn)
        .await
        .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        info!("✅ Database migrations applied");
    }

    let state = AppState::new(db_pool, &config);

    let served = AppRouter::serve(config.port, state).await;

    info!("🛑 Shutting down Storefront...");

    if let Err(e) = telemetry.shutdown().await {
        error!("Failed to shutdown telemetry: {e}");
    }

    served
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
