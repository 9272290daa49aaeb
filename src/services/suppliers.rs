use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::suppliers::{self, Column, Entity as Supplier};
use crate::entities::{bahan_baku, RecordStatus};
use crate::errors::ServiceError;
use crate::services::Paged;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSupplierInput {
    #[validate(length(min = 1, max = 100, message = "nama_supplier must be 1-100 characters"))]
    pub nama_supplier: String,
    #[validate(length(max = 100))]
    pub kontak_person: Option<String>,
    #[validate(length(max = 20))]
    pub telepon: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub alamat: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSupplierInput {
    #[validate(length(min = 1, max = 100, message = "nama_supplier must be 1-100 characters"))]
    pub nama_supplier: Option<String>,
    #[validate(length(max = 100))]
    pub kontak_person: Option<String>,
    #[validate(length(max = 20))]
    pub telepon: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub alamat: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SupplierListFilter {
    pub status: Option<RecordStatus>,
    pub search: Option<String>,
}

/// Service for managing suppliers.
#[derive(Clone)]
pub struct SupplierService {
    db_pool: Arc<DbPool>,
}

impl SupplierService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: SupplierListFilter,
        page: u64,
        limit: u64,
    ) -> Result<Paged<suppliers::Model>, ServiceError> {
        let mut query = Supplier::find();
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(Column::NamaSupplier.contains(search));
        }

        let paginator = query
            .order_by_asc(Column::NamaSupplier)
            .paginate(&*self.db_pool, limit);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok(Paged { rows, total })
    }

    /// Substring search across name and contact person.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<suppliers::Model>, ServiceError> {
        let term = query.trim();
        if term.is_empty() {
            return Err(ServiceError::ValidationError(
                "query parameter is required".to_string(),
            ));
        }
        let rows = Supplier::find()
            .filter(
                Condition::any()
                    .add(Column::NamaSupplier.contains(term))
                    .add(Column::KontakPerson.contains(term)),
            )
            .order_by_asc(Column::NamaSupplier)
            .all(&*self.db_pool)
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<suppliers::Model, ServiceError> {
        Supplier::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Supplier with id {} not found", id)))
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateSupplierInput,
    ) -> Result<suppliers::Model, ServiceError> {
        let status = parse_record_status(input.status.as_deref())?;
        let now = Utc::now();
        let model = suppliers::ActiveModel {
            nama_supplier: Set(input.nama_supplier.trim().to_string()),
            kontak_person: Set(input.kontak_person),
            telepon: Set(input.telepon),
            email: Set(input.email),
            alamat: Set(input.alamat),
            status: Set(status.unwrap_or(RecordStatus::Active)),
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
        input: UpdateSupplierInput,
    ) -> Result<suppliers::Model, ServiceError> {
        let existing = self.get(id).await?;
        let status = parse_record_status(input.status.as_deref())?;

        let mut model: suppliers::ActiveModel = existing.into();
        if let Some(nama) = input.nama_supplier {
            model.nama_supplier = Set(nama.trim().to_string());
        }
        if let Some(kontak) = input.kontak_person {
            model.kontak_person = Set(Some(kontak));
        }
        if let Some(telepon) = input.telepon {
            model.telepon = Set(Some(telepon));
        }
        if let Some(email) = input.email {
            model.email = Set(Some(email));
        }
        if let Some(alamat) = input.alamat {
            model.alamat = Set(Some(alamat));
        }
        if let Some(status) = status {
            model.status = Set(status);
        }
        model.updated_at = Set(Utc::now());

        let updated = model.update(&*self.db_pool).await?;
        Ok(updated)
    }

    /// Soft delete: flips the record to inactive so references stay valid.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<suppliers::Model, ServiceError> {
        let existing = self.get(id).await?;
        let mut model: suppliers::ActiveModel = existing.into();
        model.status = Set(RecordStatus::Inactive);
        model.updated_at = Set(Utc::now());
        let updated = model.update(&*self.db_pool).await?;
        Ok(updated)
    }

    /// Hard delete. Refused while raw materials still reference the supplier.
    #[instrument(skip(self))]
    pub async fn delete_permanent(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        let in_use = bahan_baku::Entity::find()
            .filter(bahan_baku::Column::SupplierId.eq(id))
            .count(&*self.db_pool)
            .await?;
        if in_use > 0 {
            return Err(ServiceError::InvalidState(format!(
                "Supplier {} is still referenced by {} bahan baku record(s)",
                existing.nama_supplier, in_use
            )));
        }
        Supplier::delete_by_id(id).exec(&*self.db_pool).await?;
        Ok(())
    }
}

pub(crate) fn parse_record_status(
    status: Option<&str>,
) -> Result<Option<RecordStatus>, ServiceError> {
    status
        .map(|s| {
            RecordStatus::from_str(s).map_err(|_| {
                ServiceError::ValidationError(format!(
                    "Invalid status '{}': must be one of active, inactive",
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
    fn record_status_parsing() {
        assert_eq!(
            parse_record_status(Some("active")).unwrap(),
            Some(RecordStatus::Active)
        );
        assert_eq!(
            parse_record_status(Some("inactive")).unwrap(),
            Some(RecordStatus::Inactive)
        );
        assert_eq!(parse_record_status(None).unwrap(), None);
        assert!(parse_record_status(Some("archived")).is_err());
    }
}
