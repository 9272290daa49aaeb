use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::common::{
    created_response, message_response, success_response, PaginatedResponse, PaginationParams,
};
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::po_details::{
    parse_detail_status, BulkCreatePoDetailsInput, CreatePoDetailInput, PoDetailListFilter,
    SetReceiptInput, UpdatePoDetailInput,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_details).post(create_detail))
        .route("/bulk", post(bulk_create))
        .route("/:id", get(get_detail).put(update_detail).delete(delete_detail))
        .route("/:id/status", patch(set_receipt))
        .route("/po/:id_po", get(list_for_po))
        .route("/po/:id_po/summary", get(summary))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PoDetailListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub id_po: Option<i32>,
    pub status: Option<String>,
    pub id_bahan_baku: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/po-details",
    params(PoDetailListQuery),
    responses(
        (status = 200, description = "Paginated line item list"),
        (status = 400, description = "Invalid filter", body = crate::errors::ErrorResponse)
    ),
    tag = "po-details"
)]
pub async fn list_details(
    State(state): State<AppState>,
    Query(query): Query<PoDetailListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let params = PaginationParams {
        page: query.page.unwrap_or(1),
        limit: query.limit,
    };
    let (page, limit) = params.resolve(&state.config);
    let filter = PoDetailListFilter {
        id_po: query.id_po,
        status: parse_detail_status(query.status.as_deref())?,
        id_bahan_baku: query.id_bahan_baku,
    };
    let paged = state.services.po_details.list(filter, page, limit).await?;
    Ok(success_response(PaginatedResponse::new(
        paged.rows,
        paged.total,
        page,
        limit,
    )))
}

#[utoipa::path(
    get,
    path = "/api/po-details/{id}",
    responses(
        (status = 200, description = "Line item found"),
        (status = 404, description = "Line item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "po-details"
)]
pub async fn get_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let view = state.services.po_details.get(id).await?;
    Ok(success_response(view))
}

#[utoipa::path(
    get,
    path = "/api/po-details/po/{id_po}",
    responses(
        (status = 200, description = "Line items of one order"),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "po-details"
)]
pub async fn list_for_po(
    State(state): State<AppState>,
    Path(id_po): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.services.po_details.list_for_po(id_po).await?;
    Ok(success_response(rows))
}

#[utoipa::path(
    get,
    path = "/api/po-details/po/{id_po}/summary",
    responses(
        (status = 200, description = "Per-status rollup of one order"),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "po-details"
)]
pub async fn summary(
    State(state): State<AppState>,
    Path(id_po): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let summary = state.services.po_details.summary(id_po).await?;
    Ok(success_response(summary))
}

#[utoipa::path(
    post,
    path = "/api/po-details",
    request_body = CreatePoDetailInput,
    responses(
        (status = 201, description = "Line item created"),
        (status = 400, description = "Validation failed or order not editable", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order or material not found", body = crate::errors::ErrorResponse)
    ),
    tag = "po-details"
)]
pub async fn create_detail(
    State(state): State<AppState>,
    Json(input): Json<CreatePoDetailInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.po_details.create(input).await?;
    Ok(created_response(created))
}

#[utoipa::path(
    post,
    path = "/api/po-details/bulk",
    request_body = BulkCreatePoDetailsInput,
    responses(
        (status = 201, description = "Line items created"),
        (status = 400, description = "Validation failed or order not editable", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order or material not found", body = crate::errors::ErrorResponse)
    ),
    tag = "po-details"
)]
pub async fn bulk_create(
    State(state): State<AppState>,
    Json(input): Json<BulkCreatePoDetailsInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.po_details.bulk_create(input).await?;
    Ok(created_response(created))
}

#[utoipa::path(
    put,
    path = "/api/po-details/{id}",
    request_body = UpdatePoDetailInput,
    responses(
        (status = 200, description = "Line item updated"),
        (status = 400, description = "Validation failed or order not editable", body = crate::errors::ErrorResponse),
        (status = 404, description = "Line item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "po-details"
)]
pub async fn update_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdatePoDetailInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.po_details.update(id, input).await?;
    Ok(success_response(updated))
}

#[utoipa::path(
    patch,
    path = "/api/po-details/{id}/status",
    request_body = SetReceiptInput,
    responses(
        (status = 200, description = "Receipt recorded"),
        (status = 400, description = "Invalid status or quantity", body = crate::errors::ErrorResponse),
        (status = 404, description = "Line item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "po-details"
)]
pub async fn set_receipt(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<SetReceiptInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.po_details.set_receipt(id, input).await?;
    Ok(success_response(updated))
}

#[utoipa::path(
    delete,
    path = "/api/po-details/{id}",
    responses(
        (status = 200, description = "Line item deleted"),
        (status = 400, description = "Order not editable", body = crate::errors::ErrorResponse),
        (status = 404, description = "Line item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "po-details"
)]
pub async fn delete_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.po_details.delete(id).await?;
    Ok(message_response("Purchase order detail deleted"))
}
