//! # Tasklist Auth Server
//!
//! Username/password registration and login over the `users` table.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/task_manager cargo run -p tasklist-api --bin tasklist-auth
//! ```

use std::sync::Arc;
use tasklist_api::{
    app::{build_auth_router, AuthState},
    config::Config,
    server,
};
use tasklist_shared::{auth::AuthService, db::pool::close_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    server::init_tracing(config.api.json_logs);

    tracing::info!(
        "Tasklist auth server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let pool = server::prepare_database(&config).await?;
    let auth = AuthService::new(Arc::new(pool.clone()));
    let app = build_auth_router(AuthState::new(auth, config.clone()));

    server::serve(app, &config).await?;

    close_pool(pool).await;
    Ok(())
}
