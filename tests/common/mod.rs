use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::NaiveDate;
use pawon_api::config::AppConfig;
use pawon_api::db;
use pawon_api::entities::{bahan_baku, purchase_orders, suppliers};
use pawon_api::services::bahan_baku::CreateBahanBakuInput;
use pawon_api::services::purchase_orders::CreatePurchaseOrderInput;
use pawon_api::services::suppliers::CreateSupplierInput;
use pawon_api::{build_router, AppState};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

/// Test harness backed by an in-memory SQLite database with the full schema
/// applied. A single pooled connection keeps the in-memory database alive.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            auto_migrate: true,
            cors_allowed_origins: None,
            db_max_connections: 1,
            db_min_connections: 1,
            db_connect_timeout_secs: 5,
            db_idle_timeout_secs: 600,
            db_acquire_timeout_secs: 5,
            api_default_page_size: 10,
            api_max_page_size: 100,
        };

        let pool = db::establish_connection_from_app_config(&config)
            .await
            .expect("failed to open test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");

        let state = AppState::new(Arc::new(pool), Arc::new(config));
        let router = build_router(state.clone());
        Self { router, state }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    pub async fn seed_supplier(&self, name: &str) -> suppliers::Model {
        self.state
            .services
            .suppliers
            .create(CreateSupplierInput {
                nama_supplier: name.to_string(),
                kontak_person: None,
                telepon: None,
                email: None,
                alamat: None,
                status: None,
            })
            .await
            .expect("failed to seed supplier")
    }

    pub async fn seed_bahan(&self, name: &str, supplier_id: i32) -> bahan_baku::Model {
        self.state
            .services
            .bahan_baku
            .create(CreateBahanBakuInput {
                nama_bahan: name.to_string(),
                supplier_id,
                satuan: "kg".to_string(),
                stok: Some(Decimal::ZERO),
                harga_per_satuan: None,
                stok_minimum: None,
                status: None,
                keterangan: None,
            })
            .await
            .expect("failed to seed bahan baku")
    }

    pub async fn seed_po(&self, nomor: &str, supplier_id: i32) -> purchase_orders::Model {
        self.state
            .services
            .purchase_orders
            .create(CreatePurchaseOrderInput {
                nomor_po: nomor.to_string(),
                tanggal_po: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                supplier_id,
                status: None,
                tanggal_pengiriman_diharapkan: None,
                catatan: None,
                dibuat_oleh: None,
            })
            .await
            .expect("failed to seed purchase order")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
