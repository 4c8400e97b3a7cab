use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use mealprep_backend::domain::shared::SystemClock;
use mealprep_backend::infrastructure::config::{Config, LogFormat};
use mealprep_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use mealprep_backend::infrastructure::http::{build_application, start_http_server, Repositories};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Mealprep Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    tracing::info!("Instantiating repositories...");
    let repos = Repositories::postgres(pool.clone());

    let app = build_application(pool, config.clone(), repos, Arc::new(SystemClock))?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let scheduler_handle = if config.scheduler_enabled {
        let scheduler = app.scheduler.clone();
        let poll_interval = config.scheduler_poll_interval();
        Some(tokio::spawn(async move {
            scheduler.run(poll_interval, shutdown_rx).await;
        }))
    } else {
        tracing::warn!("Meal scheduler disabled, jobs only run when triggered manually");
        None
    };

    start_http_server(app.router, &config, async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
        }
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    })
    .await?;

    if let Some(handle) = scheduler_handle {
        handle.await?;
    }

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "mealprep_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "mealprep_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
