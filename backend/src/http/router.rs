//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes::{charts, dashboard, summary, table};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route(dashboard::GET_DASHBOARD, get(handlers::get_dashboard))
        .route(summary::GET_SUMMARY, get(handlers::get_summary))
        .route(table::GET_TABLE, get(handlers::get_table))
        .route(table::GET_COUNTRIES, get(handlers::get_countries))
        .route(charts::GET_MAP, get(handlers::get_map))
        .route(charts::GET_SUNBURST, get(handlers::get_sunburst))
        .route(charts::GET_CHARTS, get(handlers::get_charts))
        .route(charts::POST_CHARTS, post(handlers::submit_charts));

    Router::new()
        .route("/", get(handlers::index_page))
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Control submissions are tiny.
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
