//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
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
use crate::routes::{alerts, export, features, labels, maps, statistics};
use crate::routes::{DATASETS, GET_CURRENT_DATASET, GET_SENSORS};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for the dashboard dev server
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Dataset lifecycle
        .route(DATASETS, post(handlers::refresh_dataset))
        .route(GET_CURRENT_DATASET, get(handlers::get_current_dataset))
        // Derived data
        .route(statistics::GET_STATISTICS, get(handlers::get_statistics))
        .route(labels::GET_LABELS, get(handlers::get_labels))
        .route(alerts::GET_ALERTS, get(handlers::get_alerts))
        .route(GET_SENSORS, get(handlers::get_sensors))
        .route(features::GET_FEATURES, get(handlers::get_features))
        // Raster layers
        .route(maps::GET_MAP, get(handlers::get_map))
        .route(maps::GET_OVERLAY, get(handlers::get_overlay))
        .route(maps::GET_LEGENDS, get(handlers::get_legends))
        // Export
        .route(export::GET_EXPORT, get(handlers::get_export))
        .route(export::GET_REPORT, get(handlers::get_report))
        .route(export::GET_IMAGE_REPORT, get(handlers::get_image_report));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
