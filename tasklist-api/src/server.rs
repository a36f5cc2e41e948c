/// Process bootstrap shared by both binaries
///
/// Each binary does the same things in the same order: initialize tracing,
/// load config, prepare the database, build its router, and serve until
/// Ctrl-C.

use crate::config::Config;
use axum::Router;
use sqlx::PgPool;
use tasklist_shared::db::{
    migrations::{ensure_database_exists, run_migrations},
    pool::create_pool,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber
///
/// `RUST_LOG` overrides the default filter. With `json` set, events are
/// written as one JSON object per line.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tasklist_api=debug,tasklist_shared=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Creates the database if needed, connects, and applies migrations
pub async fn prepare_database(config: &Config) -> anyhow::Result<PgPool> {
    ensure_database_exists(&config.database.url).await?;
    let pool = create_pool(config.pool_config()).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Binds the configured address and serves `app` until Ctrl-C
pub async fn serve(app: Router, config: &Config) -> anyhow::Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
