use std::collections::{BTreeMap, HashMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::po_details::{self, Column, Entity as PoDetail, PoDetailStatus};
use crate::entities::purchase_orders;
use crate::entities::bahan_baku;
use crate::errors::ServiceError;
use crate::services::{BahanBakuSummary, Paged, PurchaseOrderSummary};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePoDetailInput {
    pub id_po: i32,
    pub id_bahan_baku: i32,
    pub jumlah: Decimal,
    pub harga_satuan: Decimal,
    pub jumlah_diterima: Option<Decimal>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PoDetailItem {
    pub id_bahan_baku: i32,
    pub jumlah: Decimal,
    pub harga_satuan: Decimal,
    pub jumlah_diterima: Option<Decimal>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkCreatePoDetailsInput {
    pub id_po: i32,
    pub details: Vec<PoDetailItem>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePoDetailInput {
    pub id_bahan_baku: Option<i32>,
    pub jumlah: Option<Decimal>,
    pub harga_satuan: Option<Decimal>,
    pub jumlah_diterima: Option<Decimal>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetReceiptInput {
    pub status: String,
    pub jumlah_diterima: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct PoDetailListFilter {
    pub id_po: Option<i32>,
    pub status: Option<PoDetailStatus>,
    pub id_bahan_baku: Option<i32>,
}

/// Line item joined with its parent order and material summaries.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoDetailView {
    #[serde(flatten)]
    pub detail: po_details::Model,
    pub purchase_order: Option<PurchaseOrderSummary>,
    pub bahan_baku: Option<BahanBakuSummary>,
}

/// Per-status rollup of one order's line items.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusBreakdown {
    pub status: PoDetailStatus,
    pub count: u64,
    pub subtotal: Decimal,
    pub jumlah: Decimal,
    pub jumlah_diterima: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PoDetailSummary {
    pub id_po: i32,
    pub total_items: u64,
    pub total_subtotal: Decimal,
    pub per_status: Vec<StatusBreakdown>,
}

/// Line item subtotal.
pub fn compute_subtotal(jumlah: Decimal, harga_satuan: Decimal) -> Decimal {
    jumlah * harga_satuan
}

/// Receipt status derived from the received quantity. A caller-supplied
/// status only survives in one case: an explicit `rejected` while nothing
/// has been received. Everything else is decided by the quantities.
pub fn derive_receipt_status(
    jumlah: Decimal,
    jumlah_diterima: Decimal,
    requested: Option<PoDetailStatus>,
) -> PoDetailStatus {
    if jumlah_diterima.is_zero() {
        if requested == Some(PoDetailStatus::Rejected) {
            PoDetailStatus::Rejected
        } else {
            PoDetailStatus::Pending
        }
    } else if jumlah_diterima == jumlah {
        PoDetailStatus::Received
    } else {
        PoDetailStatus::Partial
    }
}

fn ensure_receipt_bounds(jumlah: Decimal, jumlah_diterima: Decimal) -> Result<(), ServiceError> {
    if jumlah_diterima < Decimal::ZERO || jumlah_diterima > jumlah {
        return Err(ServiceError::ValidationError(format!(
            "jumlah_diterima must be between 0 and {}",
            jumlah
        )));
    }
    Ok(())
}

fn ensure_quantities(jumlah: Decimal, harga_satuan: Decimal) -> Result<(), ServiceError> {
    if jumlah < Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "jumlah must not be negative".to_string(),
        ));
    }
    if harga_satuan < Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "harga_satuan must not be negative".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn parse_detail_status(
    status: Option<&str>,
) -> Result<Option<PoDetailStatus>, ServiceError> {
    status
        .map(|s| {
            PoDetailStatus::from_str(s).map_err(|_| {
                ServiceError::ValidationError(format!(
                    "Invalid status '{}': must be one of pending, received, rejected, partial",
                    s
                ))
            })
        })
        .transpose()
}

/// Service owning the purchase order line-item lifecycle. Every write path
/// funnels through the subtotal computation and the parent total recompute.
#[derive(Clone)]
pub struct PoDetailService {
    db_pool: Arc<DbPool>,
}

impl PoDetailService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: PoDetailListFilter,
        page: u64,
        limit: u64,
    ) -> Result<Paged<PoDetailView>, ServiceError> {
        let mut query = PoDetail::find();
        if let Some(id_po) = filter.id_po {
            query = query.filter(Column::IdPo.eq(id_po));
        }
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(id_bahan_baku) = filter.id_bahan_baku {
            query = query.filter(Column::IdBahanBaku.eq(id_bahan_baku));
        }

        let paginator = query
            .find_also_related(bahan_baku::Entity)
            .order_by_asc(Column::IdPoDetail)
            .paginate(&*self.db_pool, limit);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        let views = self.attach_order_summaries(rows).await?;
        Ok(Paged { rows: views, total })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<PoDetailView, ServiceError> {
        let row = PoDetail::find_by_id(id)
            .find_also_related(bahan_baku::Entity)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order detail with id {} not found", id))
            })?;
        let mut views = self.attach_order_summaries(vec![row]).await?;
        Ok(views.remove(0))
    }

    /// All line items of one order, in insertion order.
    #[instrument(skip(self))]
    pub async fn list_for_po(&self, id_po: i32) -> Result<Vec<PoDetailView>, ServiceError> {
        let order = self.get_order(id_po).await?;
        let summary = PurchaseOrderSummary::from(order);
        let rows = PoDetail::find()
            .filter(Column::IdPo.eq(id_po))
            .find_also_related(bahan_baku::Entity)
            .order_by_asc(Column::IdPoDetail)
            .all(&*self.db_pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(detail, bahan)| PoDetailView {
                detail,
                purchase_order: Some(summary.clone()),
                bahan_baku: bahan.map(BahanBakuSummary::from),
            })
            .collect())
    }

    async fn attach_order_summaries(
        &self,
        rows: Vec<(po_details::Model, Option<bahan_baku::Model>)>,
    ) -> Result<Vec<PoDetailView>, ServiceError> {
        let order_ids: HashSet<i32> = rows.iter().map(|(d, _)| d.id_po).collect();
        let orders: HashMap<i32, PurchaseOrderSummary> = purchase_orders::Entity::find()
            .filter(purchase_orders::Column::IdPo.is_in(order_ids))
            .all(&*self.db_pool)
            .await?
            .into_iter()
            .map(|order| (order.id_po, PurchaseOrderSummary::from(order)))
            .collect();
        Ok(rows
            .into_iter()
            .map(|(detail, bahan)| PoDetailView {
                purchase_order: orders.get(&detail.id_po).cloned(),
                bahan_baku: bahan.map(BahanBakuSummary::from),
                detail,
            })
            .collect())
    }

    async fn get_order(&self, id_po: i32) -> Result<purchase_orders::Model, ServiceError> {
        purchase_orders::Entity::find_by_id(id_po)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order with id {} not found", id_po))
            })
    }

    async fn get_editable_order(
        &self,
        id_po: i32,
    ) -> Result<purchase_orders::Model, ServiceError> {
        let order = self.get_order(id_po).await?;
        if !order.status.is_editable() {
            return Err(ServiceError::InvalidState(format!(
                "Line items of purchase order {} cannot change while {}",
                order.nomor_po, order.status
            )));
        }
        Ok(order)
    }

    async fn ensure_bahan_exists(&self, id_bahan_baku: i32) -> Result<(), ServiceError> {
        bahan_baku::Entity::find_by_id(id_bahan_baku)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Bahan baku with id {} not found", id_bahan_baku))
            })?;
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreatePoDetailInput,
    ) -> Result<po_details::Model, ServiceError> {
        self.get_editable_order(input.id_po).await?;
        self.ensure_bahan_exists(input.id_bahan_baku).await?;

        let requested = parse_detail_status(input.status.as_deref())?;
        ensure_quantities(input.jumlah, input.harga_satuan)?;
        let jumlah_diterima = input.jumlah_diterima.unwrap_or(Decimal::ZERO);
        ensure_receipt_bounds(input.jumlah, jumlah_diterima)?;

        let now = Utc::now();
        let model = po_details::ActiveModel {
            id_po: Set(input.id_po),
            id_bahan_baku: Set(input.id_bahan_baku),
            jumlah: Set(input.jumlah),
            harga_satuan: Set(input.harga_satuan),
            subtotal: Set(compute_subtotal(input.jumlah, input.harga_satuan)),
            jumlah_diterima: Set(jumlah_diterima),
            status: Set(derive_receipt_status(
                input.jumlah,
                jumlah_diterima,
                requested,
            )),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = model.insert(&*self.db_pool).await?;
        self.recompute_order_total(input.id_po).await?;
        Ok(created)
    }

    /// Inserts several line items at once. All items are validated before the
    /// first insert; the parent total is recomputed once at the end.
    #[instrument(skip(self, input))]
    pub async fn bulk_create(
        &self,
        input: BulkCreatePoDetailsInput,
    ) -> Result<Vec<po_details::Model>, ServiceError> {
        if input.details.is_empty() {
            return Err(ServiceError::ValidationError(
                "details must not be empty".to_string(),
            ));
        }
        self.get_editable_order(input.id_po).await?;

        let mut prepared = Vec::with_capacity(input.details.len());
        for item in &input.details {
            self.ensure_bahan_exists(item.id_bahan_baku).await?;
            let requested = parse_detail_status(item.status.as_deref())?;
            ensure_quantities(item.jumlah, item.harga_satuan)?;
            let jumlah_diterima = item.jumlah_diterima.unwrap_or(Decimal::ZERO);
            ensure_receipt_bounds(item.jumlah, jumlah_diterima)?;
            prepared.push((item, jumlah_diterima, requested));
        }

        let mut created = Vec::with_capacity(prepared.len());
        for (item, jumlah_diterima, requested) in prepared {
            let now = Utc::now();
            let model = po_details::ActiveModel {
                id_po: Set(input.id_po),
                id_bahan_baku: Set(item.id_bahan_baku),
                jumlah: Set(item.jumlah),
                harga_satuan: Set(item.harga_satuan),
                subtotal: Set(compute_subtotal(item.jumlah, item.harga_satuan)),
                jumlah_diterima: Set(jumlah_diterima),
                status: Set(derive_receipt_status(
                    item.jumlah,
                    jumlah_diterima,
                    requested,
                )),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            created.push(model.insert(&*self.db_pool).await?);
        }
        self.recompute_order_total(input.id_po).await?;
        Ok(created)
    }

    /// Quantity, price and material changes require a draft parent; receipt
    /// changes are allowed at any time and re-derive the status.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: UpdatePoDetailInput,
    ) -> Result<po_details::Model, ServiceError> {
        let existing = PoDetail::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order detail with id {} not found", id))
            })?;

        let touches_order_fields = input.id_bahan_baku.is_some()
            || input.jumlah.is_some()
            || input.harga_satuan.is_some();
        if touches_order_fields {
            self.get_editable_order(existing.id_po).await?;
        }
        if let Some(id_bahan_baku) = input.id_bahan_baku {
            self.ensure_bahan_exists(id_bahan_baku).await?;
        }

        let requested = parse_detail_status(input.status.as_deref())?;
        let jumlah = input.jumlah.unwrap_or(existing.jumlah);
        let harga_satuan = input.harga_satuan.unwrap_or(existing.harga_satuan);
        ensure_quantities(jumlah, harga_satuan)?;
        let jumlah_diterima = input.jumlah_diterima.unwrap_or(existing.jumlah_diterima);
        ensure_receipt_bounds(jumlah, jumlah_diterima)?;

        let id_po = existing.id_po;
        let subtotal = compute_subtotal(jumlah, harga_satuan);
        let subtotal_changed = subtotal != existing.subtotal;
        let status = if input.jumlah_diterima.is_some() || input.status.is_some() {
            derive_receipt_status(jumlah, jumlah_diterima, requested)
        } else if input.jumlah.is_some() {
            // The quantity moved under an unchanged receipt; keep the
            // derivation honest.
            derive_receipt_status(jumlah, jumlah_diterima, Some(existing.status))
        } else {
            existing.status
        };

        let mut model: po_details::ActiveModel = existing.into();
        if let Some(id_bahan_baku) = input.id_bahan_baku {
            model.id_bahan_baku = Set(id_bahan_baku);
        }
        model.jumlah = Set(jumlah);
        model.harga_satuan = Set(harga_satuan);
        model.subtotal = Set(subtotal);
        model.jumlah_diterima = Set(jumlah_diterima);
        model.status = Set(status);
        model.updated_at = Set(Utc::now());

        let updated = model.update(&*self.db_pool).await?;
        if subtotal_changed {
            self.recompute_order_total(id_po).await?;
        }
        Ok(updated)
    }

    /// Records a receipt. The supplied status must parse, but the stored
    /// status comes from the derivation rule whenever a quantity is given.
    #[instrument(skip(self, input))]
    pub async fn set_receipt(
        &self,
        id: i32,
        input: SetReceiptInput,
    ) -> Result<po_details::Model, ServiceError> {
        let requested = parse_detail_status(Some(input.status.as_str()))?;
        let existing = PoDetail::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order detail with id {} not found", id))
            })?;

        let jumlah_diterima = input.jumlah_diterima.unwrap_or(existing.jumlah_diterima);
        ensure_receipt_bounds(existing.jumlah, jumlah_diterima)?;
        let status = derive_receipt_status(existing.jumlah, jumlah_diterima, requested);

        let mut model: po_details::ActiveModel = existing.into();
        model.jumlah_diterima = Set(jumlah_diterima);
        model.status = Set(status);
        model.updated_at = Set(Utc::now());
        let updated = model.update(&*self.db_pool).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = PoDetail::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order detail with id {} not found", id))
            })?;
        self.get_editable_order(existing.id_po).await?;

        let id_po = existing.id_po;
        PoDetail::delete_by_id(id).exec(&*self.db_pool).await?;
        self.recompute_order_total(id_po).await?;
        Ok(())
    }

    /// Writes the sum of line subtotals into the parent's total_harga. This is
    /// the only writer of that column.
    #[instrument(skip(self))]
    pub async fn recompute_order_total(&self, id_po: i32) -> Result<Decimal, ServiceError> {
        let order = self.get_order(id_po).await?;
        let subtotals: Vec<Decimal> = PoDetail::find()
            .filter(Column::IdPo.eq(id_po))
            .select_only()
            .column(Column::Subtotal)
            .into_tuple()
            .all(&*self.db_pool)
            .await?;
        let total: Decimal = subtotals.into_iter().sum();

        let mut model: purchase_orders::ActiveModel = order.into();
        model.total_harga = Set(total);
        model.updated_at = Set(Utc::now());
        model.update(&*self.db_pool).await?;
        debug!(id_po, %total, "order total recomputed");
        Ok(total)
    }

    /// Per-status aggregate of one order's line items.
    #[instrument(skip(self))]
    pub async fn summary(&self, id_po: i32) -> Result<PoDetailSummary, ServiceError> {
        self.get_order(id_po).await?;
        let rows = PoDetail::find()
            .filter(Column::IdPo.eq(id_po))
            .all(&*self.db_pool)
            .await?;

        let mut buckets: BTreeMap<String, StatusBreakdown> = BTreeMap::new();
        let mut total_subtotal = Decimal::ZERO;
        let total_items = rows.len() as u64;
        for row in rows {
            total_subtotal += row.subtotal;
            let entry = buckets
                .entry(row.status.to_string())
                .or_insert_with(|| StatusBreakdown {
                    status: row.status,
                    count: 0,
                    subtotal: Decimal::ZERO,
                    jumlah: Decimal::ZERO,
                    jumlah_diterima: Decimal::ZERO,
                });
            entry.count += 1;
            entry.subtotal += row.subtotal;
            entry.jumlah += row.jumlah;
            entry.jumlah_diterima += row.jumlah_diterima;
        }

        Ok(PoDetailSummary {
            id_po,
            total_items,
            total_subtotal,
            per_status: buckets.into_values().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::purchase_orders::PurchaseOrderStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn subtotal_is_quantity_times_price() {
        assert_eq!(compute_subtotal(dec!(10), dec!(5)), dec!(50));
        assert_eq!(compute_subtotal(dec!(4), dec!(2.5)), dec!(10));
        assert_eq!(compute_subtotal(Decimal::ZERO, dec!(9.99)), Decimal::ZERO);
    }

    #[test]
    fn zero_receipt_defaults_to_pending() {
        assert_eq!(
            derive_receipt_status(dec!(10), Decimal::ZERO, None),
            PoDetailStatus::Pending
        );
        assert_eq!(
            derive_receipt_status(dec!(10), Decimal::ZERO, Some(PoDetailStatus::Received)),
            PoDetailStatus::Pending
        );
    }

    #[test]
    fn zero_receipt_honors_explicit_rejection() {
        assert_eq!(
            derive_receipt_status(dec!(10), Decimal::ZERO, Some(PoDetailStatus::Rejected)),
            PoDetailStatus::Rejected
        );
    }

    #[test]
    fn full_receipt_is_received_regardless_of_request() {
        assert_eq!(
            derive_receipt_status(dec!(10), dec!(10), None),
            PoDetailStatus::Received
        );
        assert_eq!(
            derive_receipt_status(dec!(10), dec!(10), Some(PoDetailStatus::Rejected)),
            PoDetailStatus::Received
        );
    }

    #[test]
    fn partial_receipt_is_partial() {
        assert_eq!(
            derive_receipt_status(dec!(10), dec!(2), None),
            PoDetailStatus::Partial
        );
        assert_eq!(
            derive_receipt_status(dec!(10), dec!(9.99), Some(PoDetailStatus::Received)),
            PoDetailStatus::Partial
        );
    }

    #[test]
    fn receipt_bounds() {
        assert!(ensure_receipt_bounds(dec!(10), dec!(0)).is_ok());
        assert!(ensure_receipt_bounds(dec!(10), dec!(10)).is_ok());
        assert!(ensure_receipt_bounds(dec!(10), dec!(10.01)).is_err());
        assert!(ensure_receipt_bounds(dec!(10), dec!(-1)).is_err());
    }

    #[test]
    fn quantity_checks() {
        assert!(ensure_quantities(dec!(1), dec!(1)).is_ok());
        assert!(ensure_quantities(dec!(-1), dec!(1)).is_err());
        assert!(ensure_quantities(dec!(1), dec!(-1)).is_err());
    }

    #[test]
    fn detail_status_parsing() {
        assert_eq!(
            parse_detail_status(Some("partial")).unwrap(),
            Some(PoDetailStatus::Partial)
        );
        assert!(parse_detail_status(Some("done")).is_err());
    }

    #[test]
    fn editable_guard_lives_on_the_enum() {
        assert!(PurchaseOrderStatus::Draft.is_editable());
        assert!(!PurchaseOrderStatus::Sent.is_editable());
    }
}
