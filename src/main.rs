use anyhow::Context;
use tracing_subscriber::EnvFilter;

use federation_payments::adapters::http::app_router;
use federation_payments::app::{build_gateways, postgres_state};
use federation_payments::config::{AppConfig, ServerConfig};

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if server.json_logs() {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.server);

    config.validate().context("Invalid configuration")?;
    tracing::info!(environment = ?config.server.environment, "Starting federation-payments");

    let pool = config
        .database
        .connect()
        .await
        .context("Failed to connect to database")?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Database migrations applied");
    }

    let gateways = build_gateways(&config.payment).context("Failed to set up payment gateways")?;
    let state = postgres_state(pool, gateways, &config.payment);

    let app = app_router(
        state,
        config.server.request_timeout(),
        &config.server.cors_origins_list(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
