//! Service-level tests for the purchase order line-item lifecycle: subtotal
//! math, order total recomputation, receipt status derivation and the
//! draft-only mutability rules.

mod common;

use assert_matches::assert_matches;
use common::TestApp;
use pawon_api::entities::po_details::PoDetailStatus;
use pawon_api::entities::purchase_orders::PurchaseOrderStatus;
use pawon_api::errors::ServiceError;
use pawon_api::services::bahan_baku::{AdjustStockInput, StockAdjustmentType};
use pawon_api::services::po_details::{
    BulkCreatePoDetailsInput, CreatePoDetailInput, PoDetailItem, SetReceiptInput,
    UpdatePoDetailInput,
};
use pawon_api::services::resep::CreateResepInput;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[tokio::test]
async fn line_items_drive_the_order_total() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("CV Sumber Rejeki").await;
    let tepung = app.seed_bahan("Tepung Terigu", supplier.id_supplier).await;
    let gula = app.seed_bahan("Gula Pasir", supplier.id_supplier).await;
    let po = app.seed_po("PO-2024-001", supplier.id_supplier).await;
    assert_eq!(po.total_harga, Decimal::ZERO);

    let first = app
        .state
        .services
        .po_details
        .create(CreatePoDetailInput {
            id_po: po.id_po,
            id_bahan_baku: tepung.id_bahan_baku,
            jumlah: dec!(10),
            harga_satuan: dec!(5),
            jumlah_diterima: None,
            status: None,
        })
        .await
        .expect("first line item");
    assert_eq!(first.subtotal, dec!(50));
    assert_eq!(first.status, PoDetailStatus::Pending);

    let order = app.state.services.purchase_orders.get(po.id_po).await;
    assert_eq!(order.unwrap().purchase_order.total_harga, dec!(50));

    let second = app
        .state
        .services
        .po_details
        .create(CreatePoDetailInput {
            id_po: po.id_po,
            id_bahan_baku: gula.id_bahan_baku,
            jumlah: dec!(4),
            harga_satuan: dec!(2.5),
            jumlah_diterima: None,
            status: None,
        })
        .await
        .expect("second line item");
    assert_eq!(second.subtotal, dec!(10));

    let order = app
        .state
        .services
        .purchase_orders
        .get(po.id_po)
        .await
        .unwrap();
    assert_eq!(order.purchase_order.total_harga, dec!(60));

    // Full receipt on the first item.
    let received = app
        .state
        .services
        .po_details
        .set_receipt(
            first.id_po_detail,
            SetReceiptInput {
                status: "received".to_string(),
                jumlah_diterima: Some(dec!(10)),
            },
        )
        .await
        .expect("receive first item");
    assert_eq!(received.status, PoDetailStatus::Received);
    assert_eq!(received.jumlah_diterima, dec!(10));

    // Partial receipt on the second.
    let partial = app
        .state
        .services
        .po_details
        .set_receipt(
            second.id_po_detail,
            SetReceiptInput {
                status: "received".to_string(),
                jumlah_diterima: Some(dec!(2)),
            },
        )
        .await
        .expect("partially receive second item");
    assert_eq!(partial.status, PoDetailStatus::Partial);

    // Receipts do not change the order total.
    let order = app
        .state
        .services
        .purchase_orders
        .get(po.id_po)
        .await
        .unwrap();
    assert_eq!(order.purchase_order.total_harga, dec!(60));
}

#[tokio::test]
async fn updating_quantity_or_price_recomputes_subtotal_and_total() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("PT Maju Jaya").await;
    let bahan = app.seed_bahan("Mentega", supplier.id_supplier).await;
    let po = app.seed_po("PO-2024-002", supplier.id_supplier).await;

    let item = app
        .state
        .services
        .po_details
        .create(CreatePoDetailInput {
            id_po: po.id_po,
            id_bahan_baku: bahan.id_bahan_baku,
            jumlah: dec!(3),
            harga_satuan: dec!(7),
            jumlah_diterima: None,
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(item.subtotal, dec!(21));

    let updated = app
        .state
        .services
        .po_details
        .update(
            item.id_po_detail,
            UpdatePoDetailInput {
                jumlah: Some(dec!(6)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.subtotal, dec!(42));

    let order = app
        .state
        .services
        .purchase_orders
        .get(po.id_po)
        .await
        .unwrap();
    assert_eq!(order.purchase_order.total_harga, dec!(42));

    // Deleting the only item brings the total back to zero.
    app.state
        .services
        .po_details
        .delete(item.id_po_detail)
        .await
        .unwrap();
    let order = app
        .state
        .services
        .purchase_orders
        .get(po.id_po)
        .await
        .unwrap();
    assert_eq!(order.purchase_order.total_harga, Decimal::ZERO);
}

#[tokio::test]
async fn bulk_create_recomputes_once() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("UD Berkah").await;
    let telur = app.seed_bahan("Telur", supplier.id_supplier).await;
    let susu = app.seed_bahan("Susu", supplier.id_supplier).await;
    let po = app.seed_po("PO-2024-003", supplier.id_supplier).await;

    let created = app
        .state
        .services
        .po_details
        .bulk_create(BulkCreatePoDetailsInput {
            id_po: po.id_po,
            details: vec![
                PoDetailItem {
                    id_bahan_baku: telur.id_bahan_baku,
                    jumlah: dec!(30),
                    harga_satuan: dec!(2),
                    jumlah_diterima: None,
                    status: None,
                },
                PoDetailItem {
                    id_bahan_baku: susu.id_bahan_baku,
                    jumlah: dec!(5),
                    harga_satuan: dec!(8),
                    jumlah_diterima: None,
                    status: None,
                },
            ],
        })
        .await
        .unwrap();
    assert_eq!(created.len(), 2);

    let order = app
        .state
        .services
        .purchase_orders
        .get(po.id_po)
        .await
        .unwrap();
    assert_eq!(order.purchase_order.total_harga, dec!(100));

    let summary = app.state.services.po_details.summary(po.id_po).await.unwrap();
    assert_eq!(summary.total_items, 2);
    assert_eq!(summary.total_subtotal, dec!(100));
}

#[tokio::test]
async fn receipt_bounds_are_enforced() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Toko Lima").await;
    let bahan = app.seed_bahan("Garam", supplier.id_supplier).await;
    let po = app.seed_po("PO-2024-004", supplier.id_supplier).await;

    let item = app
        .state
        .services
        .po_details
        .create(CreatePoDetailInput {
            id_po: po.id_po,
            id_bahan_baku: bahan.id_bahan_baku,
            jumlah: dec!(10),
            harga_satuan: dec!(1),
            jumlah_diterima: None,
            status: None,
        })
        .await
        .unwrap();

    let err = app
        .state
        .services
        .po_details
        .set_receipt(
            item.id_po_detail,
            SetReceiptInput {
                status: "received".to_string(),
                jumlah_diterima: Some(dec!(11)),
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    // Explicit rejection at zero received sticks.
    let rejected = app
        .state
        .services
        .po_details
        .set_receipt(
            item.id_po_detail,
            SetReceiptInput {
                status: "rejected".to_string(),
                jumlah_diterima: Some(Decimal::ZERO),
            },
        )
        .await
        .unwrap();
    assert_eq!(rejected.status, PoDetailStatus::Rejected);
}

#[tokio::test]
async fn non_draft_orders_reject_line_item_mutations() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("CV Abadi").await;
    let bahan = app.seed_bahan("Coklat Bubuk", supplier.id_supplier).await;
    let po = app.seed_po("PO-2024-005", supplier.id_supplier).await;

    let item = app
        .state
        .services
        .po_details
        .create(CreatePoDetailInput {
            id_po: po.id_po,
            id_bahan_baku: bahan.id_bahan_baku,
            jumlah: dec!(2),
            harga_satuan: dec!(15),
            jumlah_diterima: None,
            status: None,
        })
        .await
        .unwrap();

    app.state
        .services
        .purchase_orders
        .set_status(po.id_po, "sent")
        .await
        .unwrap();

    let err = app
        .state
        .services
        .po_details
        .create(CreatePoDetailInput {
            id_po: po.id_po,
            id_bahan_baku: bahan.id_bahan_baku,
            jumlah: dec!(1),
            harga_satuan: dec!(1),
            jumlah_diterima: None,
            status: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidState(_));

    let err = app
        .state
        .services
        .po_details
        .update(
            item.id_po_detail,
            UpdatePoDetailInput {
                jumlah: Some(dec!(4)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidState(_));

    let err = app
        .state
        .services
        .po_details
        .delete(item.id_po_detail)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidState(_));

    // Receipts are still allowed after sending.
    let updated = app
        .state
        .services
        .po_details
        .set_receipt(
            item.id_po_detail,
            SetReceiptInput {
                status: "received".to_string(),
                jumlah_diterima: Some(dec!(1)),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, PoDetailStatus::Partial);

    // The order total is untouched by the rejected mutations.
    let order = app
        .state
        .services
        .purchase_orders
        .get(po.id_po)
        .await
        .unwrap();
    assert_eq!(order.purchase_order.total_harga, dec!(30));
}

#[tokio::test]
async fn order_lifecycle_guards() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("PT Pangan Sejahtera").await;
    let po = app.seed_po("PO-2024-006", supplier.id_supplier).await;

    // Draft header edits are allowed; sent ones are not.
    app.state
        .services
        .purchase_orders
        .set_status(po.id_po, "sent")
        .await
        .unwrap();
    let err = app
        .state
        .services
        .purchase_orders
        .update(po.id_po, Default::default())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidState(_));

    // Sent orders cannot be deleted but can be received.
    let err = app
        .state
        .services
        .purchase_orders
        .delete(po.id_po)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidState(_));

    let received = app
        .state
        .services
        .purchase_orders
        .set_status(po.id_po, "received")
        .await
        .unwrap();
    assert_eq!(received.status, PurchaseOrderStatus::Received);
    assert!(received.tanggal_pengiriman_aktual.is_some());

    // Received is terminal.
    let err = app
        .state
        .services
        .purchase_orders
        .set_status(po.id_po, "cancelled")
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidState(_));
    let err = app
        .state
        .services
        .purchase_orders
        .cancel(po.id_po)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidState(_));

    // Cancelled orders can be deleted.
    let other = app.seed_po("PO-2024-007", supplier.id_supplier).await;
    app.state
        .services
        .purchase_orders
        .cancel(other.id_po)
        .await
        .unwrap();
    app.state
        .services
        .purchase_orders
        .delete(other.id_po)
        .await
        .unwrap();
}

#[tokio::test]
async fn duplicate_names_and_numbers_conflict() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("CV Kembar").await;
    app.seed_bahan("Vanili", supplier.id_supplier).await;
    app.seed_po("PO-2024-008", supplier.id_supplier).await;

    let err = app
        .state
        .services
        .bahan_baku
        .create(pawon_api::services::bahan_baku::CreateBahanBakuInput {
            nama_bahan: "Vanili".to_string(),
            supplier_id: supplier.id_supplier,
            satuan: "gr".to_string(),
            stok: None,
            harga_per_satuan: None,
            stok_minimum: None,
            status: None,
            keterangan: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));

    let err = app
        .state
        .services
        .purchase_orders
        .create(pawon_api::services::purchase_orders::CreatePurchaseOrderInput {
            nomor_po: "PO-2024-008".to_string(),
            tanggal_po: chrono::NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            supplier_id: supplier.id_supplier,
            status: None,
            tanggal_pengiriman_diharapkan: None,
            catatan: None,
            dibuat_oleh: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));

    app.state
        .services
        .resep
        .create(CreateResepInput {
            nama_resep: "Bolu Pandan".to_string(),
            kategori: None,
            status: None,
            catatan: None,
        })
        .await
        .unwrap();
    let err = app
        .state
        .services
        .resep
        .create(CreateResepInput {
            nama_resep: "Bolu Pandan".to_string(),
            kategori: None,
            status: None,
            catatan: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn stock_adjustments_respect_the_zero_floor() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Toko Bahan Kue").await;
    let bahan = app.seed_bahan("Keju", supplier.id_supplier).await;

    let result = app
        .state
        .services
        .bahan_baku
        .adjust_stock(
            bahan.id_bahan_baku,
            AdjustStockInput {
                jumlah: dec!(12.5),
                tipe: StockAdjustmentType::Tambah,
                keterangan: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(result.stok_sebelum, Decimal::ZERO);
    assert_eq!(result.stok_sesudah, dec!(12.5));

    let result = app
        .state
        .services
        .bahan_baku
        .adjust_stock(
            bahan.id_bahan_baku,
            AdjustStockInput {
                jumlah: dec!(2.5),
                tipe: StockAdjustmentType::Kurang,
                keterangan: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(result.stok_sesudah, dec!(10));

    let err = app
        .state
        .services
        .bahan_baku
        .adjust_stock(
            bahan.id_bahan_baku,
            AdjustStockInput {
                jumlah: dec!(10.01),
                tipe: StockAdjustmentType::Kurang,
                keterangan: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}
