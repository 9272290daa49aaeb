//! Pawon API: inventory backend for a small food production kitchen.
//!
//! Resources: suppliers, raw materials (bahan baku), recipes (resep) with
//! ingredient lines, and purchase orders whose line items carry the receipt
//! lifecycle that keeps each order's total in sync.

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use handlers::{api_routes, AppState};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Assembles the full application router: resource routes under `/api`,
/// health probes at the root, swagger at `/docs`, and the middleware stack.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    Router::new()
        .merge(handlers::health::routes())
        .nest("/api", api_routes())
        .merge(openapi::swagger_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}

fn cors_layer(config: &config::AppConfig) -> CorsLayer {
    match config.cors_allowed_origins.as_deref().map(str::trim) {
        Some(origins) if !origins.is_empty() => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        _ => CorsLayer::permissive(),
    }
}
