//! Veritas Backend Service
//!
//! Main entry point for the Veritas governance, risk and compliance backend.
//! This service provides:
//! - REST API for policy, control, assessment, evidence and finding management
//! - Compliance dashboard summary and trend/forecast queries
//! - Background task keeping the daily metric snapshot fresh

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use veritas_backend::config::AppConfig;
use veritas_backend::database::{create_pool, run_migrations};
use veritas_backend::error::{AppError, AppResult};
use veritas_backend::services::SnapshotScheduler;
use veritas_backend::{api, AppState};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    // Initialize tracing/logging with config
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("veritas_backend={},sqlx=warn,axum=info", config.log_level).into()
            }),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║           Veritas Backend Service Starting                ║");
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("HTTP port: {}", config.http_port);

    // =========================================================================
    // DATABASE SETUP
    // =========================================================================
    info!("Connecting to database...");

    let pool = create_pool(&config.database).await.map_err(|e| {
        error!("Failed to create database pool: {}", e);
        AppError::Database(e)
    })?;

    info!("Database connection pool created successfully");
    info!("Max connections: {}", config.database.max_connections);

    // Run migrations
    info!("Running database migrations...");
    run_migrations(&pool, None).await.map_err(|e| {
        error!("Database migration failed: {}", e);
        AppError::Database(e)
    })?;

    info!("Database migrations completed successfully");

    // =========================================================================
    // CORE SERVICES INITIALIZATION
    // =========================================================================
    info!("Initializing core services...");

    let app_state = Arc::new(AppState::new(pool));
    info!("✓ Application state initialized with repositories and services");

    // =========================================================================
    // BACKGROUND TASKS
    // =========================================================================
    let scheduler = SnapshotScheduler::new(app_state.trend_service.clone())
        .with_interval(config.snapshot_interval());

    let scheduler_handle = tokio::spawn(async move {
        scheduler.start().await;
    });
    info!(
        "✓ Snapshot scheduler started ({}s interval)",
        config.snapshot_interval_secs
    );

    // =========================================================================
    // START SERVER
    // =========================================================================
    let http_addr: SocketAddr = format!("0.0.0.0:{}", config.http_port)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid HTTP address: {}", e)))?;

    info!("Starting HTTP server on {}...", http_addr);

    let app = api::router(app_state);
    let listener = TcpListener::bind(http_addr)
        .await
        .map_err(|e| AppError::Message(format!("Failed to bind HTTP server: {}", e)))?;

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {}", e);
        }
    });

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║           Veritas Backend Service Ready!                  ║");
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("REST API:     0.0.0.0:{}", config.http_port);
    info!("Environment:  {}", config.environment);
    info!("Press Ctrl+C to shutdown gracefully");

    // =========================================================================
    // SHUTDOWN HANDLING
    // =========================================================================
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down gracefully...");
        }
        _ = server_handle => {
            error!("HTTP server exited unexpectedly");
        }
        _ = scheduler_handle => {
            error!("Snapshot scheduler exited unexpectedly");
        }
    }

    info!("Veritas backend service shutdown complete");
    Ok(())
}
