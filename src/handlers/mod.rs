//! HTTP layer: one module per resource, each exposing a `routes()` function
//! mounted under `/api` by `api_routes`.

pub mod bahan_baku;
pub mod common;
pub mod health;
pub mod po_details;
pub mod purchase_orders;
pub mod resep;
pub mod resep_details;
pub mod suppliers;

use std::sync::Arc;

use axum::Router;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::services::AppServices;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: Arc<AppConfig>,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: Arc<AppConfig>) -> Self {
        let services = AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// All resource routers mounted under their `/api` prefixes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/suppliers", suppliers::routes())
        .nest("/bahan-baku", bahan_baku::routes())
        .nest("/resep", resep::routes())
        .nest("/resep-details", resep_details::routes())
        .nest("/purchase-orders", purchase_orders::routes())
        .nest("/po-details", po_details::routes())
}
