use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::common::{
    created_response, success_response, success_with_message, validate_input, PaginatedResponse,
    PaginationParams,
};
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::bahan_baku::{
    AdjustStockInput, BahanBakuListFilter, CheckBahanAvailabilityInput, CreateBahanBakuInput,
    UpdateBahanBakuInput,
};
use crate::services::suppliers::parse_record_status;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bahan_baku).post(create_bahan_baku))
        .route("/low-stock", get(low_stock))
        .route("/check-availability", post(check_availability))
        .route(
            "/:id",
            get(get_bahan_baku)
                .put(update_bahan_baku)
                .delete(delete_bahan_baku),
        )
        .route("/:id/status", patch(set_status))
        .route("/:id/stock", patch(adjust_stock))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BahanBakuListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub supplier_id: Option<i32>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusRequest {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/api/bahan-baku",
    params(BahanBakuListQuery),
    responses(
        (status = 200, description = "Paginated bahan baku list"),
        (status = 400, description = "Invalid filter", body = crate::errors::ErrorResponse)
    ),
    tag = "bahan-baku"
)]
pub async fn list_bahan_baku(
    State(state): State<AppState>,
    Query(query): Query<BahanBakuListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let params = PaginationParams {
        page: query.page.unwrap_or(1),
        limit: query.limit,
    };
    let (page, limit) = params.resolve(&state.config);
    let filter = BahanBakuListFilter {
        status: parse_record_status(query.status.as_deref())?,
        supplier_id: query.supplier_id,
        search: query.search,
    };
    let paged = state.services.bahan_baku.list(filter, page, limit).await?;
    Ok(success_response(PaginatedResponse::new(
        paged.rows,
        paged.total,
        page,
        limit,
    )))
}

#[utoipa::path(
    get,
    path = "/api/bahan-baku/low-stock",
    params(PaginationParams),
    responses((status = 200, description = "Materials below their minimum stock")),
    tag = "bahan-baku"
)]
pub async fn low_stock(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (page, limit) = params.resolve(&state.config);
    let paged = state.services.bahan_baku.low_stock(page, limit).await?;
    Ok(success_response(PaginatedResponse::new(
        paged.rows,
        paged.total,
        page,
        limit,
    )))
}

#[utoipa::path(
    get,
    path = "/api/bahan-baku/{id}",
    responses(
        (status = 200, description = "Bahan baku found"),
        (status = 404, description = "Bahan baku not found", body = crate::errors::ErrorResponse)
    ),
    tag = "bahan-baku"
)]
pub async fn get_bahan_baku(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let view = state.services.bahan_baku.get(id).await?;
    Ok(success_response(view))
}

#[utoipa::path(
    post,
    path = "/api/bahan-baku",
    request_body = CreateBahanBakuInput,
    responses(
        (status = 201, description = "Bahan baku created"),
        (status = 400, description = "Validation failed or duplicate name", body = crate::errors::ErrorResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    ),
    tag = "bahan-baku"
)]
pub async fn create_bahan_baku(
    State(state): State<AppState>,
    Json(input): Json<CreateBahanBakuInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&input)?;
    let created = state.services.bahan_baku.create(input).await?;
    Ok(created_response(created))
}

#[utoipa::path(
    put,
    path = "/api/bahan-baku/{id}",
    request_body = UpdateBahanBakuInput,
    responses(
        (status = 200, description = "Bahan baku updated"),
        (status = 404, description = "Bahan baku not found", body = crate::errors::ErrorResponse)
    ),
    tag = "bahan-baku"
)]
pub async fn update_bahan_baku(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateBahanBakuInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&input)?;
    let updated = state.services.bahan_baku.update(id, input).await?;
    Ok(success_response(updated))
}

#[utoipa::path(
    delete,
    path = "/api/bahan-baku/{id}",
    responses(
        (status = 200, description = "Bahan baku deactivated"),
        (status = 404, description = "Bahan baku not found", body = crate::errors::ErrorResponse)
    ),
    tag = "bahan-baku"
)]
pub async fn delete_bahan_baku(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.bahan_baku.delete(id).await?;
    Ok(success_with_message("Bahan baku deactivated", updated))
}

#[utoipa::path(
    patch,
    path = "/api/bahan-baku/{id}/status",
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Invalid status", body = crate::errors::ErrorResponse)
    ),
    tag = "bahan-baku"
)]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .services
        .bahan_baku
        .set_status(id, &request.status)
        .await?;
    Ok(success_response(updated))
}

#[utoipa::path(
    patch,
    path = "/api/bahan-baku/{id}/stock",
    request_body = AdjustStockInput,
    responses(
        (status = 200, description = "Stock adjusted"),
        (status = 400, description = "Invalid adjustment", body = crate::errors::ErrorResponse),
        (status = 404, description = "Bahan baku not found", body = crate::errors::ErrorResponse)
    ),
    tag = "bahan-baku"
)]
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<AdjustStockInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let result = state.services.bahan_baku.adjust_stock(id, input).await?;
    Ok(success_response(result))
}

#[utoipa::path(
    post,
    path = "/api/bahan-baku/check-availability",
    request_body = CheckBahanAvailabilityInput,
    responses((status = 200, description = "Availability of the name")),
    tag = "bahan-baku"
)]
pub async fn check_availability(
    State(state): State<AppState>,
    Json(input): Json<CheckBahanAvailabilityInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let available = state.services.bahan_baku.check_availability(&input).await?;
    Ok(success_response(serde_json::json!({
        "nama_bahan": input.nama_bahan,
        "available": available,
    })))
}
