use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::AppConfig;
use crate::database::Store;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::{ProjectService, TaskService};

/// Shared application state available to all handlers via `State<AppState>`
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub projects: ProjectService,
    pub tasks: TaskService,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, store: Arc<dyn Store>) -> Self {
        Self {
            projects: ProjectService::new(store.clone()),
            tasks: TaskService::new(store.clone()),
            config,
            store,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(project_routes())
        .merge(task_routes())
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    let level = if state.config.api.enable_request_logging {
        Level::INFO
    } else {
        Level::DEBUG
    };

    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected
        .merge(api)
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(level))
                        .on_response(DefaultOnResponse::new().level(level)),
                )
                .layer(cors_layer(&state.config))
                .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes)),
        )
        .with_state(state)
}

fn project_routes() -> Router<AppState> {
    use protected::{projects, tasks};

    Router::new()
        .route("/api/projects", get(projects::list).post(projects::create))
        .route(
            "/api/projects/:id",
            get(projects::get).put(projects::update).delete(projects::delete),
        )
        .route(
            "/api/projects/:id/tasks",
            get(tasks::list_by_project).post(tasks::create),
        )
}

fn task_routes() -> Router<AppState> {
    use protected::tasks;

    Router::new()
        // Path used by the first generation of clients
        .route(
            "/api/tasks/projects/:id/tasks",
            get(tasks::list_by_project).post(tasks::create),
        )
        .route(
            "/api/tasks/:id",
            get(tasks::get).put(tasks::update).delete(tasks::delete),
        )
}

/// Without CORS enabled no origin is allowed.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}
