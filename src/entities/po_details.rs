use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase order line item. `subtotal` is recomputed on every mutation that
/// touches quantity or unit price, and the receipt status is derived from
/// `jumlah_diterima` rather than trusted from the caller.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "po_detail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_po_detail: i32,
    pub id_po: i32,
    pub id_bahan_baku: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub jumlah: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub harga_satuan: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub subtotal: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub jumlah_diterima: Decimal,
    pub status: PoDetailStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Line-item receipt status, derived from the received quantity.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PoDetailStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "received")]
    Received,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "partial")]
    Partial,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchase_orders::Entity",
        from = "Column::IdPo",
        to = "super::purchase_orders::Column::IdPo"
    )]
    PurchaseOrder,
    #[sea_orm(
        belongs_to = "super::bahan_baku::Entity",
        from = "Column::IdBahanBaku",
        to = "super::bahan_baku::Column::IdBahanBaku"
    )]
    BahanBaku,
}

impl Related<super::purchase_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrder.def()
    }
}

impl Related<super::bahan_baku::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BahanBaku.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
