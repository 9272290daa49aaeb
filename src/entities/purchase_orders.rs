use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase order header. `total_harga` is denormalized: it is written only
/// by the line-item service's total recompute, never by header endpoints.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "purchase_order")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_po: i32,
    #[sea_orm(unique)]
    pub nomor_po: String,
    pub tanggal_po: Date,
    pub supplier_id: i32,
    pub status: PurchaseOrderStatus,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_harga: Decimal,
    pub tanggal_pengiriman_diharapkan: Option<Date>,
    pub tanggal_pengiriman_aktual: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub catatan: Option<String>,
    pub dibuat_oleh: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Purchase order lifecycle. Transitions are checked against an explicit
/// table before every status mutation; `received` and `cancelled` are
/// terminal.
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
pub enum PurchaseOrderStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "sent")]
    Sent,
    #[sea_orm(string_value = "received")]
    Received,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl PurchaseOrderStatus {
    /// Allowed source→target pairs. Self-transitions are accepted as no-ops.
    pub fn can_transition_to(self, target: PurchaseOrderStatus) -> bool {
        use PurchaseOrderStatus::*;
        match (self, target) {
            (from, to) if from == to => true,
            (Draft, Sent) | (Draft, Received) | (Draft, Cancelled) => true,
            (Sent, Received) | (Sent, Cancelled) => true,
            _ => false,
        }
    }

    /// Header fields and line items may only change while the order is draft.
    pub fn is_editable(self) -> bool {
        matches!(self, PurchaseOrderStatus::Draft)
    }

    pub fn can_be_cancelled(self) -> bool {
        matches!(self, PurchaseOrderStatus::Draft | PurchaseOrderStatus::Sent)
    }

    pub fn can_be_deleted(self) -> bool {
        matches!(
            self,
            PurchaseOrderStatus::Draft | PurchaseOrderStatus::Cancelled
        )
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::suppliers::Column::IdSupplier"
    )]
    Supplier,
    #[sea_orm(has_many = "super::po_details::Entity")]
    PoDetails,
}

impl Related<super::suppliers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::po_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PoDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::PurchaseOrderStatus::*;

    #[test]
    fn received_and_cancelled_are_terminal() {
        for target in [Draft, Sent, Cancelled] {
            assert!(!Received.can_transition_to(target));
        }
        for target in [Draft, Sent, Received] {
            assert!(!Cancelled.can_transition_to(target));
        }
        assert!(Received.can_transition_to(Received));
        assert!(Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn draft_can_reach_every_state() {
        for target in [Draft, Sent, Received, Cancelled] {
            assert!(Draft.can_transition_to(target));
        }
    }

    #[test]
    fn sent_cannot_return_to_draft() {
        assert!(!Sent.can_transition_to(Draft));
        assert!(Sent.can_transition_to(Received));
        assert!(Sent.can_transition_to(Cancelled));
    }

    #[test]
    fn deletion_and_cancellation_guards() {
        assert!(Draft.can_be_deleted());
        assert!(Cancelled.can_be_deleted());
        assert!(!Sent.can_be_deleted());
        assert!(!Received.can_be_deleted());

        assert!(Draft.can_be_cancelled());
        assert!(Sent.can_be_cancelled());
        assert!(!Received.can_be_cancelled());
        assert!(!Cancelled.can_be_cancelled());
    }
}
