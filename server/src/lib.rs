//! Multi-user todo list service.
//!
//! Users register, may upgrade to the pro plan, and manage their own todos.
//! The caller is identified by the `username` header alone. All state lives
//! in memory for the lifetime of the process.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod store;
pub mod validators;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{ServerError, ServerResult};
pub use model::{Todo, User, FREE_PLAN_TODO_LIMIT};
pub use store::{Db, UserStore};

/// Builds the router over a fresh, empty store.
pub fn app() -> Router {
    app_with_store(UserStore::new().shared())
}

/// Builds the router over an existing store.
pub fn app_with_store(db: Db) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/users", post(handlers::create_user))
        .route("/users/{id}", get(handlers::get_user))
        .route("/users/{id}/pro", patch(handlers::upgrade_user_to_pro))
        .route("/todos", get(handlers::list_todos).post(handlers::create_todo))
        .route("/todos/{id}", put(handlers::update_todo).delete(handlers::delete_todo))
        .route("/todos/{id}/done", patch(handlers::mark_todo_done))
        .with_state(db)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Initializes tracing with the given log level. `RUST_LOG` takes precedence.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
