//! SeaORM entities for the pawon inventory schema.
//!
//! One module per table; relations mirror the foreign keys declared in the
//! migrations. Status columns are stored as strings and surfaced as typed
//! enums so lifecycle rules live on the enum, not in scattered comparisons.

pub mod bahan_baku;
pub mod po_details;
pub mod purchase_orders;
pub mod resep;
pub mod resep_details;
pub mod suppliers;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Soft-delete status shared by supplier, bahan baku and resep records.
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
pub enum RecordStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl RecordStatus {
    pub fn is_active(self) -> bool {
        matches!(self, RecordStatus::Active)
    }
}
