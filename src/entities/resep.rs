use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::RecordStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "resep")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_resep: i32,
    pub nama_resep: String,
    pub kategori: Option<String>,
    pub status: RecordStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub catatan: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::resep_details::Entity")]
    ResepDetails,
}

impl Related<super::resep_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResepDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
