//! HTTP-level tests: routing, response envelopes, status codes and the
//! pagination contract.

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn health_probes_respond() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn supplier_crud_uses_the_standard_envelope() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/suppliers",
            Some(json!({
                "nama_supplier": "CV Sumber Rejeki",
                "kontak_person": "Budi",
                "email": "budi@sumberrejeki.co.id"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["nama_supplier"], "CV Sumber Rejeki");
    assert_eq!(body["data"]["status"], "active");
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"]["updated_at"].is_string());
    let id = body["data"]["id_supplier"].as_i64().expect("supplier id");

    let response = app
        .request(Method::GET, &format!("/api/suppliers/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Soft delete flips the record to inactive.
    let response = app
        .request(Method::DELETE, &format!("/api/suppliers/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["status"], "inactive");

    let response = app.request(Method::GET, "/api/suppliers/9999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn invalid_supplier_payloads_are_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/suppliers",
            Some(json!({ "nama_supplier": "" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["status"], "error");

    let response = app
        .request(
            Method::POST,
            "/api/suppliers",
            Some(json!({
                "nama_supplier": "Toko Baru",
                "email": "not-an-address"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown status values are a validation error, not a server error.
    let response = app
        .request(
            Method::POST,
            "/api/suppliers",
            Some(json!({
                "nama_supplier": "Toko Baru",
                "status": "archived"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_endpoints_paginate_with_defaults_and_caps() {
    let app = TestApp::new().await;
    for n in 1..=12 {
        app.seed_supplier(&format!("Supplier {n:02}")).await;
    }

    let response = app.request(Method::GET, "/api/suppliers", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"]["pagination"]["total"], 12);
    assert_eq!(body["data"]["pagination"]["currentPage"], 1);
    assert_eq!(body["data"]["pagination"]["totalPages"], 2);
    assert_eq!(body["data"]["pagination"]["limit"], 10);

    let response = app
        .request(Method::GET, "/api/suppliers?page=3&limit=5", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pagination"]["currentPage"], 3);
    assert_eq!(body["data"]["pagination"]["totalPages"], 3);

    // Oversized limits are clamped to the configured maximum.
    let response = app
        .request(Method::GET, "/api/suppliers?limit=10000", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["pagination"]["limit"], 100);
}

#[tokio::test]
async fn po_detail_lifecycle_over_http() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("PT Maju Jaya").await;
    let bahan = app.seed_bahan("Tepung Terigu", supplier.id_supplier).await;
    let po = app.seed_po("PO-2024-101", supplier.id_supplier).await;

    let response = app
        .request(
            Method::POST,
            "/api/po-details",
            Some(json!({
                "id_po": po.id_po,
                "id_bahan_baku": bahan.id_bahan_baku,
                "jumlah": 10,
                "harga_satuan": 5
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["data"]["status"], "pending");
    let id = body["data"]["id_po_detail"].as_i64().expect("detail id");

    // Partial receipt via the status endpoint.
    let response = app
        .request(
            Method::PATCH,
            &format!("/api/po-details/{id}/status"),
            Some(json!({ "status": "received", "jumlah_diterima": 4 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["status"], "partial");

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/po-details/{id}/status"),
            Some(json!({ "status": "bogus" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["status"], "error");

    // Over-receipt is rejected with a validation error.
    let response = app
        .request(
            Method::PATCH,
            &format!("/api/po-details/{id}/status"),
            Some(json!({ "status": "received", "jumlah_diterima": 11 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(
            Method::GET,
            &format!("/api/po-details/po/{}/summary", po.id_po),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["total_items"], 1);
}

#[tokio::test]
async fn sent_orders_reject_line_item_writes_over_http() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("UD Berkah").await;
    let bahan = app.seed_bahan("Gula Pasir", supplier.id_supplier).await;
    let po = app.seed_po("PO-2024-102", supplier.id_supplier).await;

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/purchase-orders/{}/status", po.id_po),
            Some(json!({ "status": "sent" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["status"], "sent");

    let response = app
        .request(
            Method::POST,
            "/api/po-details",
            Some(json!({
                "id_po": po.id_po,
                "id_bahan_baku": bahan.id_bahan_baku,
                "jumlah": 1,
                "harga_satuan": 1
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn stock_adjustment_over_http() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Toko Bahan Kue").await;
    let bahan = app.seed_bahan("Keju", supplier.id_supplier).await;

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/bahan-baku/{}/stock", bahan.id_bahan_baku),
            Some(json!({ "jumlah": 3, "tipe": "tambah" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["stok_sesudah"], "3");

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/bahan-baku/{}/stock", bahan.id_bahan_baku),
            Some(json!({ "jumlah": 5, "tipe": "kurang" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn availability_checks_answer_by_name() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("CV Abadi").await;
    app.seed_bahan("Coklat Bubuk", supplier.id_supplier).await;

    let response = app
        .request(
            Method::POST,
            "/api/bahan-baku/check-availability",
            Some(json!({ "nama_bahan": "Coklat Bubuk" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["available"], false);

    let response = app
        .request(
            Method::POST,
            "/api/bahan-baku/check-availability",
            Some(json!({ "nama_bahan": "Vanili" })),
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["available"], true);
}
