use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities;
use crate::errors::ErrorResponse;
use crate::handlers;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pawon API",
        version = "1.0.0",
        description = "Inventory backend for a small food production kitchen: \
suppliers, raw materials (bahan baku), recipes (resep) and purchase orders \
with line-item receipt tracking."
    ),
    paths(
        handlers::health::health,
        handlers::suppliers::list_suppliers,
        handlers::suppliers::search_suppliers,
        handlers::suppliers::get_supplier,
        handlers::suppliers::create_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,
        handlers::suppliers::delete_supplier_permanent,
        handlers::bahan_baku::list_bahan_baku,
        handlers::bahan_baku::low_stock,
        handlers::bahan_baku::get_bahan_baku,
        handlers::bahan_baku::create_bahan_baku,
        handlers::bahan_baku::update_bahan_baku,
        handlers::bahan_baku::delete_bahan_baku,
        handlers::bahan_baku::set_status,
        handlers::bahan_baku::adjust_stock,
        handlers::bahan_baku::check_availability,
        handlers::resep::list_resep,
        handlers::resep::kategori_list,
        handlers::resep::search_resep,
        handlers::resep::get_resep,
        handlers::resep::create_resep,
        handlers::resep::update_resep,
        handlers::resep::set_status,
        handlers::resep::delete_resep,
        handlers::resep::check_availability,
        handlers::resep_details::list_details,
        handlers::resep_details::get_detail,
        handlers::resep_details::list_for_resep,
        handlers::resep_details::create_detail,
        handlers::resep_details::batch_create,
        handlers::resep_details::update_detail,
        handlers::resep_details::batch_update,
        handlers::resep_details::delete_detail,
        handlers::purchase_orders::list_orders,
        handlers::purchase_orders::search_orders,
        handlers::purchase_orders::list_for_supplier,
        handlers::purchase_orders::get_order,
        handlers::purchase_orders::create_order,
        handlers::purchase_orders::update_order,
        handlers::purchase_orders::set_status,
        handlers::purchase_orders::cancel_order,
        handlers::purchase_orders::delete_order,
        handlers::po_details::list_details,
        handlers::po_details::get_detail,
        handlers::po_details::list_for_po,
        handlers::po_details::summary,
        handlers::po_details::create_detail,
        handlers::po_details::bulk_create,
        handlers::po_details::update_detail,
        handlers::po_details::set_receipt,
        handlers::po_details::delete_detail,
    ),
    components(schemas(
        ErrorResponse,
        handlers::health::HealthResponse,
        handlers::purchase_orders::SetStatusRequest,
        entities::RecordStatus,
        entities::suppliers::Model,
        entities::bahan_baku::Model,
        entities::resep::Model,
        entities::resep_details::Model,
        entities::purchase_orders::Model,
        entities::purchase_orders::PurchaseOrderStatus,
        entities::po_details::Model,
        entities::po_details::PoDetailStatus,
        services::SupplierSummary,
        services::BahanBakuSummary,
        services::PurchaseOrderSummary,
        services::suppliers::CreateSupplierInput,
        services::suppliers::UpdateSupplierInput,
        services::bahan_baku::CreateBahanBakuInput,
        services::bahan_baku::UpdateBahanBakuInput,
        services::bahan_baku::AdjustStockInput,
        services::bahan_baku::StockAdjustmentType,
        services::bahan_baku::CheckBahanAvailabilityInput,
        services::bahan_baku::BahanBakuView,
        services::bahan_baku::StockAdjustmentView,
        services::resep::CreateResepInput,
        services::resep::UpdateResepInput,
        services::resep::CheckResepAvailabilityInput,
        services::resep::ResepView,
        services::resep::ResepIngredientView,
        services::resep_details::CreateResepDetailInput,
        services::resep_details::BatchResepDetailItem,
        services::resep_details::BatchCreateResepDetailsInput,
        services::resep_details::BatchUpdateResepDetailsInput,
        services::resep_details::UpdateResepDetailInput,
        services::resep_details::ResepDetailView,
        services::resep_details::BatchCreateReport,
        services::resep_details::BatchUpdateReport,
        services::resep_details::BatchUpdateFailure,
        services::purchase_orders::CreatePurchaseOrderInput,
        services::purchase_orders::UpdatePurchaseOrderInput,
        services::purchase_orders::PurchaseOrderView,
        services::purchase_orders::PurchaseOrderDetailView,
        services::purchase_orders::OrderLineView,
        services::po_details::CreatePoDetailInput,
        services::po_details::PoDetailItem,
        services::po_details::BulkCreatePoDetailsInput,
        services::po_details::UpdatePoDetailInput,
        services::po_details::SetReceiptInput,
        services::po_details::PoDetailView,
        services::po_details::PoDetailSummary,
        services::po_details::StatusBreakdown,
    )),
    tags(
        (name = "health", description = "Service health probes"),
        (name = "suppliers", description = "Supplier management"),
        (name = "bahan-baku", description = "Raw material stock"),
        (name = "resep", description = "Recipes"),
        (name = "resep-details", description = "Recipe ingredient lines"),
        (name = "purchase-orders", description = "Purchase order headers"),
        (name = "po-details", description = "Purchase order line items")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at /docs, serving the generated document.
pub fn swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_builds_and_serializes() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).expect("document serializes");
        assert!(json["paths"]["/api/po-details/{id}/status"].is_object());
        assert!(json["paths"]["/api/suppliers"].is_object());
    }

    #[test]
    fn timestamped_models_carry_a_schema() {
        let json = serde_json::to_value(ApiDoc::openapi()).expect("document serializes");
        let schemas = &json["components"]["schemas"];
        assert!(schemas["Model"]["properties"]["created_at"].is_object());
        assert!(schemas["Model"]["properties"]["updated_at"].is_object());
    }
}
