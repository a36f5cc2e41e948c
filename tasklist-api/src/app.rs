/// Application state and router builders
///
/// The auth server and the task server are separate deployables, so each gets
/// its own state type and router. They share the middleware stack.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tasklist_api::{app::{build_tasks_router, TasksState}, config::Config};
/// use tasklist_shared::{db::pool::create_pool, tasks::TaskService};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// let state = TasksState::new(TaskService::new(Arc::new(pool)), config);
/// let app = build_tasks_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    error::ApiError,
    middleware::security::{security_headers, SecurityHeaders},
    routes,
};
use async_trait::async_trait;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tasklist_shared::{auth::AuthService, error::StoreError, tasks::TaskService};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// State that can report whether its backing store is reachable
#[async_trait]
pub trait StoreProbe: Clone + Send + Sync + 'static {
    async fn ping_store(&self) -> Result<(), StoreError>;
}

/// Shared state of the auth server
#[derive(Clone)]
pub struct AuthState {
    /// Register/login service
    pub auth: AuthService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AuthState {
    pub fn new(auth: AuthService, config: Config) -> Self {
        Self {
            auth,
            config: Arc::new(config),
        }
    }
}

#[async_trait]
impl StoreProbe for AuthState {
    async fn ping_store(&self) -> Result<(), StoreError> {
        self.auth.store().ping().await
    }
}

/// Shared state of the task server
#[derive(Clone)]
pub struct TasksState {
    /// Task CRUD service
    pub tasks: TaskService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl TasksState {
    pub fn new(tasks: TaskService, config: Config) -> Self {
        Self {
            tasks,
            config: Arc::new(config),
        }
    }
}

#[async_trait]
impl StoreProbe for TasksState {
    async fn ping_store(&self) -> Result<(), StoreError> {
        self.tasks.store().ping().await
    }
}

/// Builds the auth server router
///
/// ```text
/// /
/// ├── GET  /health
/// ├── POST /api/register
/// └── POST /api/login
/// ```
pub fn build_auth_router(state: AuthState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        .route("/health", get(routes::health::health_check::<AuthState>))
        .route("/api/register", post(routes::auth::register))
        .route("/api/login", post(routes::auth::login))
        .with_state(state);

    with_middleware(router, &config)
}

/// Builds the task server router
///
/// ```text
/// /
/// ├── GET    /health
/// ├── GET    /tasks
/// ├── POST   /tasks
/// ├── PUT    /tasks/:id
/// └── DELETE /tasks/:id
/// ```
pub fn build_tasks_router(state: TasksState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        .route("/health", get(routes::health::health_check::<TasksState>))
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .with_state(state);

    with_middleware(router, &config)
}

/// Static fallback, tracing, CORS and security headers
///
/// Layers run outermost-last: security headers wrap CORS, which wraps tracing.
fn with_middleware(router: Router, config: &Config) -> Router {
    let router = match &config.api.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.fallback(route_not_found),
    };

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(config))
        .layer(axum::middleware::from_fn_with_state(
            SecurityHeaders {
                enable_hsts: config.api.production,
            },
            security_headers,
        ))
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
