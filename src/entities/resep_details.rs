use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe. The (id_resep, id_bahan_baku) pair is
/// kept unique by the create paths, not by a storage constraint.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "resep_detail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_resep_detail: i32,
    pub id_resep: i32,
    pub id_bahan_baku: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub jumlah: Decimal,
    pub unit: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::resep::Entity",
        from = "Column::IdResep",
        to = "super::resep::Column::IdResep"
    )]
    Resep,
    #[sea_orm(
        belongs_to = "super::bahan_baku::Entity",
        from = "Column::IdBahanBaku",
        to = "super::bahan_baku::Column::IdBahanBaku"
    )]
    BahanBaku,
}

impl Related<super::resep::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resep.def()
    }
}

impl Related<super::bahan_baku::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BahanBaku.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
