//! Edueasee Assist Engine Server Binary
//!
//! Main entry point for running the assist engine as a standalone HTTP
//! server: tool endpoints, session and billing endpoints, and health
//! probes.

use edueasee_engine::{
    api::{handlers::AppState, routes::build_router},
    config::Config,
    gemini::GeminiClient,
    observability::HealthChecker,
    session::{AuthClient, BillingClient, SessionStore},
    tools::ToolEngine,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration from file
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let config = Config::from_file_with_env(&config_path)?;
    config.validate()?;

    // Initialize tracing with configuration from config
    use tracing_subscriber::EnvFilter;

    match config.logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .json()
                .with_env_filter(EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())))
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .compact()
                .with_env_filter(EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())))
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .with_env_filter(EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())))
                .init();
        }
    }

    info!("Starting Edueasee Assist Engine");
    info!("Configuration loaded and validated from {}", config_path);

    // Initialize the generator and tool engine
    let generator = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let engine = Arc::new(ToolEngine::new(generator, config.limits.clone()));
    info!("Tool engine initialized");

    // Initialize session store against the auth backend
    let auth_client = Arc::new(AuthClient::new(config.auth.clone())?);
    let session = Arc::new(SessionStore::new(auth_client));
    info!("Session store initialized");

    // Initialize billing client
    let billing = Arc::new(BillingClient::new(config.billing.clone())?);
    info!("Billing client initialized");

    // Initialize health checker
    let health_checker = Arc::new(
        HealthChecker::new()
            .with_component("model_api")
            .with_component("auth_backend")
            .with_component("billing_backend"),
    );

    // Create application state and router
    let app_state = AppState {
        engine,
        session,
        billing,
        health_checker,
        limits: config.limits.clone(),
    };
    let app = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Starting graceful shutdown");
}
