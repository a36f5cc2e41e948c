//! # Tasklist Task Server
//!
//! Task list CRUD over the `tasks` table, plus the static front end when
//! `STATIC_DIR` is set.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/task_manager cargo run -p tasklist-api --bin tasklist-tasks
//! ```

use std::sync::Arc;
use tasklist_api::{
    app::{build_tasks_router, TasksState},
    config::Config,
    server,
};
use tasklist_shared::{db::pool::close_pool, tasks::TaskService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    server::init_tracing(config.api.json_logs);

    tracing::info!(
        "Tasklist task server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let pool = server::prepare_database(&config).await?;
    let tasks = TaskService::new(Arc::new(pool.clone()));
    let app = build_tasks_router(TasksState::new(tasks, config.clone()));

    server::serve(app, &config).await?;

    close_pool(pool).await;
    Ok(())
}
