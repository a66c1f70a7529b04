use bandsite_api::{app, config, is_production, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, STRIPE_SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bandsite_api=info,tower_http=info")),
        )
        .init();

    let config = config::config().clone();
    tracing::info!("Starting band site API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() || config.security.admin_password_hash.is_empty() {
        if is_production!() {
            tracing::warn!("ADMIN_PASSWORD_HASH or JWT_SECRET is not set; the admin panel is locked");
        } else {
            tracing::info!("Admin login disabled until ADMIN_PASSWORD_HASH and JWT_SECRET are set");
        }
    }

    let port = config.server.port;
    let state = AppState::from_config(config)?;

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on http://{}", bind_addr);

    // Serve while migrations and seeding run; /health reports degraded until the database answers
    let init_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = init_state.prepare_database().await {
            tracing::error!("Database initialisation failed: {}", e);
        }
    });

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
