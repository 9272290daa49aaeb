use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::RecordStatus;

/// Raw material stock item. `stok` is only guarded against going negative at
/// mutation time; the column itself carries no check constraint.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "bahan_baku")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_bahan_baku: i32,
    pub nama_bahan: String,
    pub supplier_id: i32,
    pub satuan: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub stok: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub harga_per_satuan: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub stok_minimum: Decimal,
    pub status: RecordStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub keterangan: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::suppliers::Column::IdSupplier"
    )]
    Supplier,
    #[sea_orm(has_many = "super::resep_details::Entity")]
    ResepDetails,
    #[sea_orm(has_many = "super::po_details::Entity")]
    PoDetails,
}

impl Related<super::suppliers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::resep_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResepDetails.def()
    }
}

impl Related<super::po_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PoDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
