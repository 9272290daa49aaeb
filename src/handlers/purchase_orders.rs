use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::common::{
    created_response, message_response, success_response, validate_input, PaginatedResponse,
    PaginationParams,
};
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::purchase_orders::{
    parse_po_status, CreatePurchaseOrderInput, PurchaseOrderListFilter, UpdatePurchaseOrderInput,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/search", get(search_orders))
        .route("/supplier/:supplier_id", get(list_for_supplier))
        .route("/:id", get(get_order).put(update_order).delete(delete_order))
        .route("/:id/status", patch(set_status))
        .route("/:id/cancel", patch(cancel_order))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PurchaseOrderListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub supplier_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub nomor_po: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusRequest {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/api/purchase-orders",
    params(PurchaseOrderListQuery),
    responses(
        (status = 200, description = "Paginated purchase order list"),
        (status = 400, description = "Invalid filter", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<PurchaseOrderListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let params = PaginationParams {
        page: query.page.unwrap_or(1),
        limit: query.limit,
    };
    let (page, limit) = params.resolve(&state.config);
    let filter = PurchaseOrderListFilter {
        status: parse_po_status(query.status.as_deref())?,
        supplier_id: query.supplier_id,
        start_date: query.start_date,
        end_date: query.end_date,
        nomor_po: query.nomor_po,
    };
    let paged = state
        .services
        .purchase_orders
        .list(filter, page, limit)
        .await?;
    Ok(success_response(PaginatedResponse::new(
        paged.rows,
        paged.total,
        page,
        limit,
    )))
}

#[utoipa::path(
    get,
    path = "/api/purchase-orders/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching purchase orders"),
        (status = 400, description = "Missing query", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn search_orders(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state
        .services
        .purchase_orders
        .search(query.query.as_deref().unwrap_or_default())
        .await?;
    Ok(success_response(rows))
}

#[utoipa::path(
    get,
    path = "/api/purchase-orders/supplier/{supplier_id}",
    responses(
        (status = 200, description = "Orders of one supplier"),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn list_for_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state
        .services
        .purchase_orders
        .list_for_supplier(supplier_id)
        .await?;
    Ok(success_response(rows))
}

#[utoipa::path(
    get,
    path = "/api/purchase-orders/{id}",
    responses(
        (status = 200, description = "Order with supplier and line items"),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let view = state.services.purchase_orders.get(id).await?;
    Ok(success_response(view))
}

#[utoipa::path(
    post,
    path = "/api/purchase-orders",
    request_body = CreatePurchaseOrderInput,
    responses(
        (status = 201, description = "Order created"),
        (status = 400, description = "Validation failed or duplicate number", body = crate::errors::ErrorResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseOrderInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&input)?;
    let created = state.services.purchase_orders.create(input).await?;
    Ok(created_response(created))
}

#[utoipa::path(
    put,
    path = "/api/purchase-orders/{id}",
    request_body = UpdatePurchaseOrderInput,
    responses(
        (status = 200, description = "Order updated"),
        (status = 400, description = "Order is not editable", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdatePurchaseOrderInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&input)?;
    let updated = state.services.purchase_orders.update(id, input).await?;
    Ok(success_response(updated))
}

#[utoipa::path(
    patch,
    path = "/api/purchase-orders/{id}/status",
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Status changed"),
        (status = 400, description = "Transition not allowed", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .services
        .purchase_orders
        .set_status(id, &request.status)
        .await?;
    Ok(success_response(updated))
}

#[utoipa::path(
    patch,
    path = "/api/purchase-orders/{id}/cancel",
    responses(
        (status = 200, description = "Order cancelled"),
        (status = 400, description = "Order cannot be cancelled", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.purchase_orders.cancel(id).await?;
    Ok(success_response(updated))
}

#[utoipa::path(
    delete,
    path = "/api/purchase-orders/{id}",
    responses(
        (status = 200, description = "Order deleted"),
        (status = 400, description = "Order cannot be deleted", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.purchase_orders.delete(id).await?;
    Ok(message_response("Purchase order deleted"))
}
