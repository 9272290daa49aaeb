use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::resep::{self, Column, Entity as Resep};
use crate::entities::{bahan_baku, resep_details, RecordStatus};
use crate::errors::ServiceError;
use crate::services::suppliers::parse_record_status;
use crate::services::{BahanBakuSummary, Paged};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateResepInput {
    #[validate(length(min = 1, max = 100, message = "nama_resep must be 1-100 characters"))]
    pub nama_resep: String,
    #[validate(length(max = 50))]
    pub kategori: Option<String>,
    pub status: Option<String>,
    pub catatan: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateResepInput {
    #[validate(length(min = 1, max = 100, message = "nama_resep must be 1-100 characters"))]
    pub nama_resep: Option<String>,
    #[validate(length(max = 50))]
    pub kategori: Option<String>,
    pub status: Option<String>,
    pub catatan: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckResepAvailabilityInput {
    pub nama_resep: String,
    pub id_resep: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct ResepListFilter {
    pub status: Option<RecordStatus>,
    pub kategori: Option<String>,
    pub search: Option<String>,
}

/// Ingredient line joined with its material summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResepIngredientView {
    #[serde(flatten)]
    pub detail: resep_details::Model,
    pub bahan_baku: Option<BahanBakuSummary>,
}

/// Recipe with its full ingredient list.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResepView {
    #[serde(flatten)]
    pub resep: resep::Model,
    pub details: Vec<ResepIngredientView>,
}

/// Service for managing recipes.
#[derive(Clone)]
pub struct ResepService {
    db_pool: Arc<DbPool>,
}

impl ResepService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: ResepListFilter,
        page: u64,
        limit: u64,
    ) -> Result<Paged<resep::Model>, ServiceError> {
        let mut query = Resep::find();
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(kategori) = filter.kategori.as_deref().map(str::trim).filter(|s| !s.is_empty())
        {
            query = query.filter(Column::Kategori.eq(kategori));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(Column::NamaResep.contains(search));
        }

        let paginator = query
            .order_by_asc(Column::NamaResep)
            .paginate(&*self.db_pool, limit);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok(Paged { rows, total })
    }

    /// Distinct non-empty kategori values, for filter dropdowns.
    #[instrument(skip(self))]
    pub async fn kategori_list(&self) -> Result<Vec<String>, ServiceError> {
        let values: Vec<Option<String>> = Resep::find()
            .select_only()
            .column(Column::Kategori)
            .distinct()
            .order_by_asc(Column::Kategori)
            .into_tuple()
            .all(&*self.db_pool)
            .await?;
        Ok(values
            .into_iter()
            .flatten()
            .filter(|k| !k.trim().is_empty())
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn search(&self, name: &str) -> Result<Vec<resep::Model>, ServiceError> {
        let term = name.trim();
        if term.is_empty() {
            return Err(ServiceError::ValidationError(
                "name parameter is required".to_string(),
            ));
        }
        let rows = Resep::find()
            .filter(Column::NamaResep.contains(term))
            .order_by_asc(Column::NamaResep)
            .all(&*self.db_pool)
            .await?;
        Ok(rows)
    }

    /// Recipe with its ingredient lines and their material summaries.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<ResepView, ServiceError> {
        let resep = self.get_model(id).await?;
        let details = resep_details::Entity::find()
            .filter(resep_details::Column::IdResep.eq(id))
            .find_also_related(bahan_baku::Entity)
            .order_by_asc(resep_details::Column::IdResepDetail)
            .all(&*self.db_pool)
            .await?;
        Ok(ResepView {
            resep,
            details: details
                .into_iter()
                .map(|(detail, bahan)| ResepIngredientView {
                    detail,
                    bahan_baku: bahan.map(BahanBakuSummary::from),
                })
                .collect(),
        })
    }

    async fn get_model(&self, id: i32) -> Result<resep::Model, ServiceError> {
        Resep::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Resep with id {} not found", id)))
    }

    async fn ensure_name_unique(
        &self,
        nama_resep: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = Resep::find().filter(Column::NamaResep.eq(nama_resep));
        if let Some(id) = exclude_id {
            query = query.filter(Column::IdResep.ne(id));
        }
        if query.count(&*self.db_pool).await? > 0 {
            return Err(ServiceError::Conflict(format!(
                "Resep '{}' already exists",
                nama_resep
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateResepInput) -> Result<resep::Model, ServiceError> {
        let status = parse_record_status(input.status.as_deref())?;
        let nama_resep = input.nama_resep.trim().to_string();
        self.ensure_name_unique(&nama_resep, None).await?;

        let now = Utc::now();
        let model = resep::ActiveModel {
            nama_resep: Set(nama_resep),
            kategori: Set(input.kategori),
            status: Set(status.unwrap_or(RecordStatus::Active)),
            catatan: Set(input.catatan),
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
        input: UpdateResepInput,
    ) -> Result<resep::Model, ServiceError> {
        let existing = self.get_model(id).await?;
        let status = parse_record_status(input.status.as_deref())?;
        if let Some(nama) = input.nama_resep.as_deref() {
            self.ensure_name_unique(nama.trim(), Some(id)).await?;
        }

        let mut model: resep::ActiveModel = existing.into();
        if let Some(nama) = input.nama_resep {
            model.nama_resep = Set(nama.trim().to_string());
        }
        if let Some(kategori) = input.kategori {
            model.kategori = Set(Some(kategori));
        }
        if let Some(status) = status {
            model.status = Set(status);
        }
        if let Some(catatan) = input.catatan {
            model.catatan = Set(Some(catatan));
        }
        model.updated_at = Set(Utc::now());

        let updated = model.update(&*self.db_pool).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: i32, status: &str) -> Result<resep::Model, ServiceError> {
        let status = RecordStatus::from_str(status).map_err(|_| {
            ServiceError::ValidationError(format!(
                "Invalid status '{}': must be one of active, inactive",
                status
            ))
        })?;
        let existing = self.get_model(id).await?;
        let mut model: resep::ActiveModel = existing.into();
        model.status = Set(status);
        model.updated_at = Set(Utc::now());
        let updated = model.update(&*self.db_pool).await?;
        Ok(updated)
    }

    /// Hard delete, removing ingredient lines first.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.get_model(id).await?;
        resep_details::Entity::delete_many()
            .filter(resep_details::Column::IdResep.eq(id))
            .exec(&*self.db_pool)
            .await?;
        Resep::delete_by_id(id).exec(&*self.db_pool).await?;
        Ok(())
    }

    /// Name-uniqueness probe used by the create/edit forms.
    #[instrument(skip(self))]
    pub async fn check_availability(
        &self,
        input: &CheckResepAvailabilityInput,
    ) -> Result<bool, ServiceError> {
        let nama = input.nama_resep.trim();
        if nama.is_empty() {
            return Err(ServiceError::ValidationError(
                "nama_resep is required".to_string(),
            ));
        }
        let mut query = Resep::find().filter(Column::NamaResep.eq(nama));
        if let Some(id) = input.id_resep {
            query = query.filter(Column::IdResep.ne(id));
        }
        Ok(query.count(&*self.db_pool).await? == 0)
    }
}
