use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::bahan_baku::{self, Column, Entity as BahanBaku};
use crate::entities::{suppliers, RecordStatus};
use crate::errors::ServiceError;
use crate::services::suppliers::parse_record_status;
use crate::services::{Paged, SupplierSummary};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBahanBakuInput {
    #[validate(length(min = 1, max = 100, message = "nama_bahan must be 1-100 characters"))]
    pub nama_bahan: String,
    pub supplier_id: i32,
    #[validate(length(min = 1, max = 20, message = "satuan must be 1-20 characters"))]
    pub satuan: String,
    pub stok: Option<Decimal>,
    pub harga_per_satuan: Option<Decimal>,
    pub stok_minimum: Option<Decimal>,
    pub status: Option<String>,
    pub keterangan: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBahanBakuInput {
    #[validate(length(min = 1, max = 100, message = "nama_bahan must be 1-100 characters"))]
    pub nama_bahan: Option<String>,
    pub supplier_id: Option<i32>,
    #[validate(length(min = 1, max = 20, message = "satuan must be 1-20 characters"))]
    pub satuan: Option<String>,
    pub stok: Option<Decimal>,
    pub harga_per_satuan: Option<Decimal>,
    pub stok_minimum: Option<Decimal>,
    pub status: Option<String>,
    pub keterangan: Option<String>,
}

/// Direction of a manual stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockAdjustmentType {
    Tambah,
    Kurang,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AdjustStockInput {
    pub jumlah: Decimal,
    pub tipe: StockAdjustmentType,
    pub keterangan: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckBahanAvailabilityInput {
    pub nama_bahan: String,
    pub id_bahan_baku: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct BahanBakuListFilter {
    pub status: Option<RecordStatus>,
    pub supplier_id: Option<i32>,
    pub search: Option<String>,
}

/// Bahan baku row joined with its supplier summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct BahanBakuView {
    #[serde(flatten)]
    pub bahan: bahan_baku::Model,
    pub supplier: Option<SupplierSummary>,
}

/// Result of a manual stock adjustment, reporting both sides of the change.
#[derive(Debug, Serialize, ToSchema)]
pub struct StockAdjustmentView {
    #[serde(flatten)]
    pub bahan: bahan_baku::Model,
    pub stok_sebelum: Decimal,
    pub stok_sesudah: Decimal,
}

/// Service for managing raw material stock records.
#[derive(Clone)]
pub struct BahanBakuService {
    db_pool: Arc<DbPool>,
}

impl BahanBakuService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: BahanBakuListFilter,
        page: u64,
        limit: u64,
    ) -> Result<Paged<BahanBakuView>, ServiceError> {
        let mut query = BahanBaku::find();
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(supplier_id) = filter.supplier_id {
            query = query.filter(Column::SupplierId.eq(supplier_id));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(Column::NamaBahan.contains(search));
        }

        let paginator = query
            .find_also_related(suppliers::Entity)
            .order_by_asc(Column::NamaBahan)
            .paginate(&*self.db_pool, limit);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok(Paged {
            rows: rows.into_iter().map(into_view).collect(),
            total,
        })
    }

    /// Rows whose stock has fallen below their minimum, lowest stock first.
    #[instrument(skip(self))]
    pub async fn low_stock(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<Paged<BahanBakuView>, ServiceError> {
        let paginator = BahanBaku::find()
            .filter(Column::Status.eq(RecordStatus::Active))
            .filter(Expr::col(Column::Stok).lt(Expr::col(Column::StokMinimum)))
            .find_also_related(suppliers::Entity)
            .order_by_asc(Column::Stok)
            .paginate(&*self.db_pool, limit);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok(Paged {
            rows: rows.into_iter().map(into_view).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<BahanBakuView, ServiceError> {
        let row = BahanBaku::find_by_id(id)
            .find_also_related(suppliers::Entity)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Bahan baku with id {} not found", id)))?;
        Ok(into_view(row))
    }

    async fn get_model(&self, id: i32) -> Result<bahan_baku::Model, ServiceError> {
        BahanBaku::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Bahan baku with id {} not found", id)))
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

    async fn ensure_name_unique(
        &self,
        nama_bahan: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = BahanBaku::find().filter(Column::NamaBahan.eq(nama_bahan));
        if let Some(id) = exclude_id {
            query = query.filter(Column::IdBahanBaku.ne(id));
        }
        if query.count(&*self.db_pool).await? > 0 {
            return Err(ServiceError::Conflict(format!(
                "Bahan baku '{}' already exists",
                nama_bahan
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateBahanBakuInput,
    ) -> Result<bahan_baku::Model, ServiceError> {
        let status = parse_record_status(input.status.as_deref())?;
        let nama_bahan = input.nama_bahan.trim().to_string();

        self.ensure_supplier_exists(input.supplier_id).await?;
        self.ensure_name_unique(&nama_bahan, None).await?;

        for (field, value) in [
            ("stok", input.stok),
            ("harga_per_satuan", input.harga_per_satuan),
            ("stok_minimum", input.stok_minimum),
        ] {
            ensure_non_negative(field, value)?;
        }

        let now = Utc::now();
        let model = bahan_baku::ActiveModel {
            nama_bahan: Set(nama_bahan),
            supplier_id: Set(input.supplier_id),
            satuan: Set(input.satuan.trim().to_string()),
            stok: Set(input.stok.unwrap_or(Decimal::ZERO)),
            harga_per_satuan: Set(input.harga_per_satuan.unwrap_or(Decimal::ZERO)),
            stok_minimum: Set(input.stok_minimum.unwrap_or(Decimal::ZERO)),
            status: Set(status.unwrap_or(RecordStatus::Active)),
            keterangan: Set(input.keterangan),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = model.insert(&*self.db_pool).await?;
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: UpdateBahanBakuInput,
    ) -> Result<bahan_baku::Model, ServiceError> {
        let existing = self.get_model(id).await?;
        let status = parse_record_status(input.status.as_deref())?;

        if let Some(supplier_id) = input.supplier_id {
            self.ensure_supplier_exists(supplier_id).await?;
        }
        if let Some(nama) = input.nama_bahan.as_deref() {
            self.ensure_name_unique(nama.trim(), Some(id)).await?;
        }
        for (field, value) in [
            ("stok", input.stok),
            ("harga_per_satuan", input.harga_per_satuan),
            ("stok_minimum", input.stok_minimum),
        ] {
            ensure_non_negative(field, value)?;
        }

        let mut model: bahan_baku::ActiveModel = existing.into();
        if let Some(nama) = input.nama_bahan {
            model.nama_bahan = Set(nama.trim().to_string());
        }
        if let Some(supplier_id) = input.supplier_id {
            model.supplier_id = Set(supplier_id);
        }
        if let Some(satuan) = input.satuan {
            model.satuan = Set(satuan.trim().to_string());
        }
        if let Some(stok) = input.stok {
            model.stok = Set(stok);
        }
        if let Some(harga) = input.harga_per_satuan {
            model.harga_per_satuan = Set(harga);
        }
        if let Some(minimum) = input.stok_minimum {
            model.stok_minimum = Set(minimum);
        }
        if let Some(status) = status {
            model.status = Set(status);
        }
        if let Some(keterangan) = input.keterangan {
            model.keterangan = Set(Some(keterangan));
        }
        model.updated_at = Set(Utc::now());

        let updated = model.update(&*self.db_pool).await?;
        Ok(updated)
    }

    /// Soft delete: flips the record to inactive.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<bahan_baku::Model, ServiceError> {
        let existing = self.get_model(id).await?;
        let mut model: bahan_baku::ActiveModel = existing.into();
        model.status = Set(RecordStatus::Inactive);
        model.updated_at = Set(Utc::now());
        let updated = model.update(&*self.db_pool).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<bahan_baku::Model, ServiceError> {
        let status = RecordStatus::from_str(status).map_err(|_| {
            ServiceError::ValidationError(format!(
                "Invalid status '{}': must be one of active, inactive",
                status
            ))
        })?;
        let existing = self.get_model(id).await?;
        let mut model: bahan_baku::ActiveModel = existing.into();
        model.status = Set(status);
        model.updated_at = Set(Utc::now());
        let updated = model.update(&*self.db_pool).await?;
        Ok(updated)
    }

    /// Manual stock adjustment. Decreases must not take stock below zero.
    #[instrument(skip(self, input))]
    pub async fn adjust_stock(
        &self,
        id: i32,
        input: AdjustStockInput,
    ) -> Result<StockAdjustmentView, ServiceError> {
        if input.jumlah <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "jumlah must be greater than zero".to_string(),
            ));
        }
        let existing = self.get_model(id).await?;
        let stok_sebelum = existing.stok;
        let stok_sesudah = match input.tipe {
            StockAdjustmentType::Tambah => stok_sebelum + input.jumlah,
            StockAdjustmentType::Kurang => {
                if input.jumlah > stok_sebelum {
                    return Err(ServiceError::ValidationError(format!(
                        "Insufficient stock: {} available, {} requested",
                        stok_sebelum, input.jumlah
                    )));
                }
                stok_sebelum - input.jumlah
            }
        };

        let mut model: bahan_baku::ActiveModel = existing.into();
        model.stok = Set(stok_sesudah);
        if let Some(keterangan) = input.keterangan {
            model.keterangan = Set(Some(keterangan));
        }
        model.updated_at = Set(Utc::now());
        let updated = model.update(&*self.db_pool).await?;

        Ok(StockAdjustmentView {
            bahan: updated,
            stok_sebelum,
            stok_sesudah,
        })
    }

    /// Name-uniqueness probe used by the create/edit forms.
    #[instrument(skip(self))]
    pub async fn check_availability(
        &self,
        input: &CheckBahanAvailabilityInput,
    ) -> Result<bool, ServiceError> {
        let nama = input.nama_bahan.trim();
        if nama.is_empty() {
            return Err(ServiceError::ValidationError(
                "nama_bahan is required".to_string(),
            ));
        }
        let mut query = BahanBaku::find().filter(Column::NamaBahan.eq(nama));
        if let Some(id) = input.id_bahan_baku {
            query = query.filter(Column::IdBahanBaku.ne(id));
        }
        Ok(query.count(&*self.db_pool).await? == 0)
    }
}

fn into_view(row: (bahan_baku::Model, Option<suppliers::Model>)) -> BahanBakuView {
    BahanBakuView {
        bahan: row.0,
        supplier: row.1.map(SupplierSummary::from),
    }
}

fn ensure_non_negative(field: &str, value: Option<Decimal>) -> Result<(), ServiceError> {
    match value {
        Some(v) if v < Decimal::ZERO => Err(ServiceError::ValidationError(format!(
            "{} must not be negative",
            field
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_values_are_rejected() {
        assert!(ensure_non_negative("stok", Some(dec!(-0.01))).is_err());
        assert!(ensure_non_negative("stok", Some(Decimal::ZERO)).is_ok());
        assert!(ensure_non_negative("stok", None).is_ok());
    }
}
