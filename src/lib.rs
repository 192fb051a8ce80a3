use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod hierarchy;
pub mod messages;
pub mod store;

use store::Store;

/// Shared handler state. The store is built once in `main` and passed in by
/// handle; nothing reaches for a process-wide database global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::employees::index))
        .route("/search/:name", get(handlers::employees::search))
        .route("/get-employee/:employee_id", get(handlers::employees::show))
        .route("/command-chain/:employee_id", get(handlers::chain::command_chain))
        .route("/subordinates/:employee_id", get(handlers::chain::subordinates))
        .route("/add", post(handlers::employees::add))
        .route("/update", post(handlers::employees::update))
        .route("/delete/:employee_id", delete(handlers::employees::destroy))
        .route("/health", get(handlers::health))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
