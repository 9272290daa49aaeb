use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::resep_details::{self, Column, Entity as ResepDetail};
use crate::entities::{bahan_baku, resep};
use crate::errors::ServiceError;
use crate::services::{BahanBakuSummary, Paged};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateResepDetailInput {
    pub id_resep: i32,
    pub id_bahan_baku: i32,
    pub jumlah: Decimal,
    #[validate(length(max = 20))]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BatchResepDetailItem {
    pub id_bahan_baku: i32,
    pub jumlah: Decimal,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BatchCreateResepDetailsInput {
    pub id_resep: i32,
    pub bahan_list: Vec<BatchResepDetailItem>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateResepDetailInput {
    pub id_bahan_baku: Option<i32>,
    pub jumlah: Option<Decimal>,
    #[validate(length(max = 20))]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BatchUpdateResepDetailsInput {
    pub updates: Vec<BatchResepDetailItem>,
}

#[derive(Debug, Clone, Default)]
pub struct ResepDetailListFilter {
    pub id_resep: Option<i32>,
    pub id_bahan_baku: Option<i32>,
}

/// Ingredient line joined with its material summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResepDetailView {
    #[serde(flatten)]
    pub detail: resep_details::Model,
    pub bahan_baku: Option<BahanBakuSummary>,
}

/// Batch insert outcome: rows that went in plus per-item warnings for the rest.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchCreateReport {
    pub created: Vec<resep_details::Model>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchUpdateFailure {
    pub id_bahan_baku: i32,
    pub reason: String,
}

/// Batch update outcome keyed by id_bahan_baku.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchUpdateReport {
    pub updated: Vec<resep_details::Model>,
    pub failed: Vec<BatchUpdateFailure>,
}

/// Service for managing recipe ingredient lines.
#[derive(Clone)]
pub struct ResepDetailService {
    db_pool: Arc<DbPool>,
}

impl ResepDetailService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: ResepDetailListFilter,
        page: u64,
        limit: u64,
    ) -> Result<Paged<ResepDetailView>, ServiceError> {
        let mut query = ResepDetail::find();
        if let Some(id_resep) = filter.id_resep {
            query = query.filter(Column::IdResep.eq(id_resep));
        }
        if let Some(id_bahan_baku) = filter.id_bahan_baku {
            query = query.filter(Column::IdBahanBaku.eq(id_bahan_baku));
        }

        let paginator = query
            .find_also_related(bahan_baku::Entity)
            .order_by_asc(Column::IdResepDetail)
            .paginate(&*self.db_pool, limit);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok(Paged {
            rows: rows.into_iter().map(into_view).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<ResepDetailView, ServiceError> {
        let row = ResepDetail::find_by_id(id)
            .find_also_related(bahan_baku::Entity)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Resep detail with id {} not found", id))
            })?;
        Ok(into_view(row))
    }

    /// Ordered ingredient list for one recipe.
    #[instrument(skip(self))]
    pub async fn list_for_resep(&self, id_resep: i32) -> Result<Vec<ResepDetailView>, ServiceError> {
        self.ensure_resep_exists(id_resep).await?;
        let rows = ResepDetail::find()
            .filter(Column::IdResep.eq(id_resep))
            .find_also_related(bahan_baku::Entity)
            .order_by_asc(Column::IdResepDetail)
            .all(&*self.db_pool)
            .await?;
        Ok(rows.into_iter().map(into_view).collect())
    }

    async fn ensure_resep_exists(&self, id_resep: i32) -> Result<(), ServiceError> {
        resep::Entity::find_by_id(id_resep)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Resep with id {} not found", id_resep)))?;
        Ok(())
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

    async fn pair_exists(&self, id_resep: i32, id_bahan_baku: i32) -> Result<bool, ServiceError> {
        let count = ResepDetail::find()
            .filter(Column::IdResep.eq(id_resep))
            .filter(Column::IdBahanBaku.eq(id_bahan_baku))
            .count(&*self.db_pool)
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateResepDetailInput,
    ) -> Result<resep_details::Model, ServiceError> {
        if input.jumlah < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "jumlah must not be negative".to_string(),
            ));
        }
        self.ensure_resep_exists(input.id_resep).await?;
        self.ensure_bahan_exists(input.id_bahan_baku).await?;
        if self.pair_exists(input.id_resep, input.id_bahan_baku).await? {
            return Err(ServiceError::Conflict(format!(
                "Resep {} already contains bahan baku {}",
                input.id_resep, input.id_bahan_baku
            )));
        }

        let now = Utc::now();
        let model = resep_details::ActiveModel {
            id_resep: Set(input.id_resep),
            id_bahan_baku: Set(input.id_bahan_baku),
            jumlah: Set(input.jumlah),
            unit: Set(input.unit),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = model.insert(&*self.db_pool).await?;
        Ok(created)
    }

    /// Inserts a whole ingredient list. Items referencing missing materials or
    /// duplicating an existing pair are skipped and reported as warnings; the
    /// call fails only when nothing at all could be inserted.
    #[instrument(skip(self, input))]
    pub async fn batch_create(
        &self,
        input: BatchCreateResepDetailsInput,
    ) -> Result<BatchCreateReport, ServiceError> {
        if input.bahan_list.is_empty() {
            return Err(ServiceError::ValidationError(
                "bahan_list must not be empty".to_string(),
            ));
        }
        self.ensure_resep_exists(input.id_resep).await?;

        let mut created = Vec::new();
        let mut warnings = Vec::new();
        let mut seen: HashSet<i32> = HashSet::new();

        for item in input.bahan_list {
            if !seen.insert(item.id_bahan_baku) {
                warnings.push(format!(
                    "Bahan baku {} appears more than once in the request",
                    item.id_bahan_baku
                ));
                continue;
            }
            if item.jumlah < Decimal::ZERO {
                warnings.push(format!(
                    "Bahan baku {}: jumlah must not be negative",
                    item.id_bahan_baku
                ));
                continue;
            }
            if self.ensure_bahan_exists(item.id_bahan_baku).await.is_err() {
                warnings.push(format!("Bahan baku {} not found", item.id_bahan_baku));
                continue;
            }
            if self.pair_exists(input.id_resep, item.id_bahan_baku).await? {
                warnings.push(format!(
                    "Bahan baku {} is already part of this resep",
                    item.id_bahan_baku
                ));
                continue;
            }

            let now = Utc::now();
            let model = resep_details::ActiveModel {
                id_resep: Set(input.id_resep),
                id_bahan_baku: Set(item.id_bahan_baku),
                jumlah: Set(item.jumlah),
                unit: Set(item.unit),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            created.push(model.insert(&*self.db_pool).await?);
        }

        if created.is_empty() {
            return Err(ServiceError::ValidationError(format!(
                "No ingredient rows could be inserted: {}",
                warnings.join("; ")
            )));
        }
        Ok(BatchCreateReport { created, warnings })
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: UpdateResepDetailInput,
    ) -> Result<resep_details::Model, ServiceError> {
        let existing = ResepDetail::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Resep detail with id {} not found", id))
            })?;

        if let Some(jumlah) = input.jumlah {
            if jumlah < Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "jumlah must not be negative".to_string(),
                ));
            }
        }
        if let Some(id_bahan_baku) = input.id_bahan_baku {
            self.ensure_bahan_exists(id_bahan_baku).await?;
            if id_bahan_baku != existing.id_bahan_baku
                && self.pair_exists(existing.id_resep, id_bahan_baku).await?
            {
                return Err(ServiceError::Conflict(format!(
                    "Resep {} already contains bahan baku {}",
                    existing.id_resep, id_bahan_baku
                )));
            }
        }

        let mut model: resep_details::ActiveModel = existing.into();
        if let Some(id_bahan_baku) = input.id_bahan_baku {
            model.id_bahan_baku = Set(id_bahan_baku);
        }
        if let Some(jumlah) = input.jumlah {
            model.jumlah = Set(jumlah);
        }
        if let Some(unit) = input.unit {
            model.unit = Set(Some(unit));
        }
        model.updated_at = Set(Utc::now());

        let updated = model.update(&*self.db_pool).await?;
        Ok(updated)
    }

    /// Updates several lines of one recipe in a single call, keyed by
    /// id_bahan_baku. Missing pairs are reported, not fatal.
    #[instrument(skip(self, input))]
    pub async fn batch_update(
        &self,
        id_resep: i32,
        input: BatchUpdateResepDetailsInput,
    ) -> Result<BatchUpdateReport, ServiceError> {
        if input.updates.is_empty() {
            return Err(ServiceError::ValidationError(
                "updates must not be empty".to_string(),
            ));
        }
        self.ensure_resep_exists(id_resep).await?;

        let mut updated = Vec::new();
        let mut failed = Vec::new();

        for item in input.updates {
            if item.jumlah < Decimal::ZERO {
                failed.push(BatchUpdateFailure {
                    id_bahan_baku: item.id_bahan_baku,
                    reason: "jumlah must not be negative".to_string(),
                });
                continue;
            }
            let row = ResepDetail::find()
                .filter(Column::IdResep.eq(id_resep))
                .filter(Column::IdBahanBaku.eq(item.id_bahan_baku))
                .one(&*self.db_pool)
                .await?;
            let Some(row) = row else {
                failed.push(BatchUpdateFailure {
                    id_bahan_baku: item.id_bahan_baku,
                    reason: "not part of this resep".to_string(),
                });
                continue;
            };

            let mut model: resep_details::ActiveModel = row.into();
            model.jumlah = Set(item.jumlah);
            if let Some(unit) = item.unit {
                model.unit = Set(Some(unit));
            }
            model.updated_at = Set(Utc::now());
            updated.push(model.update(&*self.db_pool).await?);
        }

        Ok(BatchUpdateReport { updated, failed })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = ResepDetail::delete_by_id(id).exec(&*self.db_pool).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Resep detail with id {} not found",
                id
            )));
        }
        Ok(())
    }
}

fn into_view(row: (resep_details::Model, Option<bahan_baku::Model>)) -> ResepDetailView {
    ResepDetailView {
        detail: row.0,
        bahan_baku: row.1.map(BahanBakuSummary::from),
    }
}
