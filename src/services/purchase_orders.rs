use std::str::FromStr;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::purchase_orders::{self, Column, Entity as PurchaseOrder, PurchaseOrderStatus};
use crate::entities::{bahan_baku, po_details, suppliers};
use crate::errors::ServiceError;
use crate::services::{BahanBakuSummary, Paged, SupplierSummary};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePurchaseOrderInput {
    #[validate(length(min = 1, max = 20, message = "nomor_po must be 1-20 characters"))]
    pub nomor_po: String,
    pub tanggal_po: NaiveDate,
    pub supplier_id: i32,
    pub status: Option<String>,
    pub tanggal_pengiriman_diharapkan: Option<NaiveDate>,
    pub catatan: Option<String>,
    #[validate(length(max = 50))]
    pub dibuat_oleh: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePurchaseOrderInput {
    #[validate(length(min = 1, max = 20, message = "nomor_po must be 1-20 characters"))]
    pub nomor_po: Option<String>,
    pub tanggal_po: Option<NaiveDate>,
    pub supplier_id: Option<i32>,
    pub tanggal_pengiriman_diharapkan: Option<NaiveDate>,
    pub tanggal_pengiriman_aktual: Option<NaiveDate>,
    pub catatan: Option<String>,
    #[validate(length(max = 50))]
    pub dibuat_oleh: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PurchaseOrderListFilter {
    pub status: Option<PurchaseOrderStatus>,
    pub supplier_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub nomor_po: Option<String>,
}

/// Purchase order joined with its supplier summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseOrderView {
    #[serde(flatten)]
    pub purchase_order: purchase_orders::Model,
    pub supplier: Option<SupplierSummary>,
}

/// Line item embedded in the order detail response.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineView {
    #[serde(flatten)]
    pub detail: po_details::Model,
    pub bahan_baku: Option<BahanBakuSummary>,
}

/// Full order: header, supplier summary and all line items.
#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseOrderDetailView {
    #[serde(flatten)]
    pub purchase_order: purchase_orders::Model,
    pub supplier: Option<SupplierSummary>,
    pub details: Vec<OrderLineView>,
}

/// Service for managing purchase order headers and their lifecycle.
#[derive(Clone)]
pub struct PurchaseOrderService {
    db_pool: Arc<DbPool>,
}

impl PurchaseOrderService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: PurchaseOrderListFilter,
        page: u64,
        limit: u64,
    ) -> Result<Paged<PurchaseOrderView>, ServiceError> {
        let mut query = PurchaseOrder::find();
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(supplier_id) = filter.supplier_id {
            query = query.filter(Column::SupplierId.eq(supplier_id));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(Column::TanggalPo.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(Column::TanggalPo.lte(end));
        }
        if let Some(nomor) = filter.nomor_po.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(Column::NomorPo.contains(nomor));
        }

        let paginator = query
            .find_also_related(suppliers::Entity)
            .order_by_desc(Column::TanggalPo)
            .order_by_desc(Column::IdPo)
            .paginate(&*self.db_pool, limit);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok(Paged {
            rows: rows.into_iter().map(into_view).collect(),
            total,
        })
    }

    /// Substring search on the order number.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<PurchaseOrderView>, ServiceError> {
        let term = query.trim();
        if term.is_empty() {
            return Err(ServiceError::ValidationError(
                "query parameter is required".to_string(),
            ));
        }
        let rows = PurchaseOrder::find()
            .filter(Column::NomorPo.contains(term))
            .find_also_related(suppliers::Entity)
            .order_by_desc(Column::TanggalPo)
            .all(&*self.db_pool)
            .await?;
        Ok(rows.into_iter().map(into_view).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_for_supplier(
        &self,
        supplier_id: i32,
    ) -> Result<Vec<PurchaseOrderView>, ServiceError> {
        let supplier = suppliers::Entity::find_by_id(supplier_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Supplier with id {} not found", supplier_id))
            })?;
        let summary = SupplierSummary::from(supplier);
        let rows = PurchaseOrder::find()
            .filter(Column::SupplierId.eq(supplier_id))
            .order_by_desc(Column::TanggalPo)
            .all(&*self.db_pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|purchase_order| PurchaseOrderView {
                purchase_order,
                supplier: Some(summary.clone()),
            })
            .collect())
    }

    /// Order with supplier summary and all line items.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<PurchaseOrderDetailView, ServiceError> {
        let (purchase_order, supplier) = PurchaseOrder::find_by_id(id)
            .find_also_related(suppliers::Entity)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order with id {} not found", id))
            })?;
        let details = po_details::Entity::find()
            .filter(po_details::Column::IdPo.eq(id))
            .find_also_related(bahan_baku::Entity)
            .order_by_asc(po_details::Column::IdPoDetail)
            .all(&*self.db_pool)
            .await?;
        Ok(PurchaseOrderDetailView {
            purchase_order,
            supplier: supplier.map(SupplierSummary::from),
            details: details
                .into_iter()
                .map(|(detail, bahan)| OrderLineView {
                    detail,
                    bahan_baku: bahan.map(BahanBakuSummary::from),
                })
                .collect(),
        })
    }

    pub(crate) async fn get_model(
        &self,
        id: i32,
    ) -> Result<purchase_orders::Model, ServiceError> {
        PurchaseOrder::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order with id {} not found", id))
            })
    }

    async fn ensure_supplier_exists(&self, supplier_id: i32) -> Result<(), ServiceError> {
        suppliers::Entity::find_by_id(supplier_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Supplier with id {} not found", supplier_id))
            })?;
        Ok(())
    }

    async fn ensure_nomor_unique(
        &self,
        nomor_po: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = PurchaseOrder::find().filter(Column::NomorPo.eq(nomor_po));
        if let Some(id) = exclude_id {
            query = query.filter(Column::IdPo.ne(id));
        }
        if query.count(&*self.db_pool).await? > 0 {
            return Err(ServiceError::Conflict(format!(
                "Purchase order number '{}' already exists",
                nomor_po
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreatePurchaseOrderInput,
    ) -> Result<purchase_orders::Model, ServiceError> {
        let status = parse_po_status(input.status.as_deref())?.unwrap_or(PurchaseOrderStatus::Draft);
        let nomor_po = input.nomor_po.trim().to_string();

        self.ensure_supplier_exists(input.supplier_id).await?;
        self.ensure_nomor_unique(&nomor_po, None).await?;

        let now = Utc::now();
        let model = purchase_orders::ActiveModel {
            nomor_po: Set(nomor_po),
            tanggal_po: Set(input.tanggal_po),
            supplier_id: Set(input.supplier_id),
            status: Set(status),
            total_harga: Set(Decimal::ZERO),
            tanggal_pengiriman_diharapkan: Set(input.tanggal_pengiriman_diharapkan),
            tanggal_pengiriman_aktual: Set(None),
            catatan: Set(input.catatan),
            dibuat_oleh: Set(input.dibuat_oleh),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = model.insert(&*self.db_pool).await?;
        info!(id_po = created.id_po, nomor_po = %created.nomor_po, "purchase order created");
        Ok(created)
    }

    /// Header updates are only allowed while the order is still draft.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: UpdatePurchaseOrderInput,
    ) -> Result<purchase_orders::Model, ServiceError> {
        let existing = self.get_model(id).await?;
        if !existing.status.is_editable() {
            return Err(ServiceError::InvalidState(format!(
                "Purchase order {} cannot be edited while {}",
                existing.nomor_po, existing.status
            )));
        }
        if let Some(nomor) = input.nomor_po.as_deref() {
            self.ensure_nomor_unique(nomor.trim(), Some(id)).await?;
        }
        if let Some(supplier_id) = input.supplier_id {
            if supplier_id != existing.supplier_id {
                self.ensure_supplier_exists(supplier_id).await?;
            }
        }

        let mut model: purchase_orders::ActiveModel = existing.into();
        if let Some(nomor) = input.nomor_po {
            model.nomor_po = Set(nomor.trim().to_string());
        }
        if let Some(tanggal) = input.tanggal_po {
            model.tanggal_po = Set(tanggal);
        }
        if let Some(supplier_id) = input.supplier_id {
            model.supplier_id = Set(supplier_id);
        }
        if let Some(date) = input.tanggal_pengiriman_diharapkan {
            model.tanggal_pengiriman_diharapkan = Set(Some(date));
        }
        if let Some(date) = input.tanggal_pengiriman_aktual {
            model.tanggal_pengiriman_aktual = Set(Some(date));
        }
        if let Some(catatan) = input.catatan {
            model.catatan = Set(Some(catatan));
        }
        if let Some(dibuat_oleh) = input.dibuat_oleh {
            model.dibuat_oleh = Set(Some(dibuat_oleh));
        }
        model.updated_at = Set(Utc::now());

        let updated = model.update(&*self.db_pool).await?;
        Ok(updated)
    }

    /// Moves the order along its lifecycle. Receiving an order stamps the
    /// actual delivery date when the caller has not set one.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<purchase_orders::Model, ServiceError> {
        let target = parse_po_status(Some(status))?.unwrap_or(PurchaseOrderStatus::Draft);
        let existing = self.get_model(id).await?;
        if !existing.status.can_transition_to(target) {
            return Err(ServiceError::InvalidState(format!(
                "Purchase order {} cannot move from {} to {}",
                existing.nomor_po, existing.status, target
            )));
        }

        let stamp_delivery =
            target == PurchaseOrderStatus::Received && existing.tanggal_pengiriman_aktual.is_none();
        let mut model: purchase_orders::ActiveModel = existing.into();
        model.status = Set(target);
        if stamp_delivery {
            model.tanggal_pengiriman_aktual = Set(Some(Utc::now().date_naive()));
        }
        model.updated_at = Set(Utc::now());

        let updated = model.update(&*self.db_pool).await?;
        info!(id_po = updated.id_po, status = %updated.status, "purchase order status changed");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: i32) -> Result<purchase_orders::Model, ServiceError> {
        let existing = self.get_model(id).await?;
        if !existing.status.can_be_cancelled() {
            return Err(ServiceError::InvalidState(format!(
                "Purchase order {} cannot be cancelled while {}",
                existing.nomor_po, existing.status
            )));
        }
        let mut model: purchase_orders::ActiveModel = existing.into();
        model.status = Set(PurchaseOrderStatus::Cancelled);
        model.updated_at = Set(Utc::now());
        let updated = model.update(&*self.db_pool).await?;
        Ok(updated)
    }

    /// Hard delete, allowed only from draft or cancelled. Line items go first.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_model(id).await?;
        if !existing.status.can_be_deleted() {
            return Err(ServiceError::InvalidState(format!(
                "Purchase order {} cannot be deleted while {}",
                existing.nomor_po, existing.status
            )));
        }
        po_details::Entity::delete_many()
            .filter(po_details::Column::IdPo.eq(id))
            .exec(&*self.db_pool)
            .await?;
        PurchaseOrder::delete_by_id(id).exec(&*self.db_pool).await?;
        Ok(())
    }
}

fn into_view(row: (purchase_orders::Model, Option<suppliers::Model>)) -> PurchaseOrderView {
    PurchaseOrderView {
        purchase_order: row.0,
        supplier: row.1.map(SupplierSummary::from),
    }
}

pub(crate) fn parse_po_status(
    status: Option<&str>,
) -> Result<Option<PurchaseOrderStatus>, ServiceError> {
    status
        .map(|s| {
            PurchaseOrderStatus::from_str(s).map_err(|_| {
                ServiceError::ValidationError(format!(
                    "Invalid status '{}': must be one of draft, sent, received, cancelled",
                    s
                ))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn po_status_parsing() {
        assert_eq!(
            parse_po_status(Some("sent")).unwrap(),
            Some(PurchaseOrderStatus::Sent)
        );
        assert_eq!(parse_po_status(None).unwrap(), None);
        assert!(parse_po_status(Some("shipped")).is_err());
    }
}
