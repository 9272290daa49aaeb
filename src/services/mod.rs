//! Business logic layer. Each resource gets one service owning its queries,
//! validation against related records, and lifecycle rules; handlers stay
//! thin and only translate HTTP to service calls.

pub mod bahan_baku;
pub mod po_details;
pub mod purchase_orders;
pub mod resep;
pub mod resep_details;
pub mod suppliers;

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities;

/// One page of rows plus the unpaginated row count.
#[derive(Debug)]
pub struct Paged<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

/// Supplier fields embedded in joined responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SupplierSummary {
    pub id_supplier: i32,
    pub nama_supplier: String,
}

impl From<entities::suppliers::Model> for SupplierSummary {
    fn from(model: entities::suppliers::Model) -> Self {
        Self {
            id_supplier: model.id_supplier,
            nama_supplier: model.nama_supplier,
        }
    }
}

/// Bahan baku fields embedded in joined responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BahanBakuSummary {
    pub id_bahan_baku: i32,
    pub nama_bahan: String,
    pub satuan: String,
}

impl From<entities::bahan_baku::Model> for BahanBakuSummary {
    fn from(model: entities::bahan_baku::Model) -> Self {
        Self {
            id_bahan_baku: model.id_bahan_baku,
            nama_bahan: model.nama_bahan,
            satuan: model.satuan,
        }
    }
}

/// Purchase order fields embedded in line-item responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PurchaseOrderSummary {
    pub id_po: i32,
    pub nomor_po: String,
    pub status: entities::purchase_orders::PurchaseOrderStatus,
}

impl From<entities::purchase_orders::Model> for PurchaseOrderSummary {
    fn from(model: entities::purchase_orders::Model) -> Self {
        Self {
            id_po: model.id_po,
            nomor_po: model.nomor_po,
            status: model.status,
        }
    }
}

/// All resource services sharing one connection pool.
#[derive(Clone)]
pub struct AppServices {
    pub suppliers: suppliers::SupplierService,
    pub bahan_baku: bahan_baku::BahanBakuService,
    pub resep: resep::ResepService,
    pub resep_details: resep_details::ResepDetailService,
    pub purchase_orders: purchase_orders::PurchaseOrderService,
    pub po_details: po_details::PoDetailService,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            suppliers: suppliers::SupplierService::new(db_pool.clone()),
            bahan_baku: bahan_baku::BahanBakuService::new(db_pool.clone()),
            resep: resep::ResepService::new(db_pool.clone()),
            resep_details: resep_details::ResepDetailService::new(db_pool.clone()),
            purchase_orders: purchase_orders::PurchaseOrderService::new(db_pool.clone()),
            po_details: po_details::PoDetailService::new(db_pool),
        }
    }
}
