use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::common::{
    created_response, message_response, success_response, validate_input, PaginatedResponse,
    PaginationParams,
};
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::suppliers::{
    parse_record_status, CreateSupplierInput, SupplierListFilter, UpdateSupplierInput,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route("/search", get(search_suppliers))
        .route(
            "/:id",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
        .route("/:id/permanent", delete(delete_supplier_permanent))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SupplierListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    pub query: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/suppliers",
    params(SupplierListQuery),
    responses(
        (status = 200, description = "Paginated supplier list"),
        (status = 400, description = "Invalid filter", body = crate::errors::ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(query): Query<SupplierListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let params = PaginationParams {
        page: query.page.unwrap_or(1),
        limit: query.limit,
    };
    let (page, limit) = params.resolve(&state.config);
    let filter = SupplierListFilter {
        status: parse_record_status(query.status.as_deref())?,
        search: query.search,
    };
    let paged = state.services.suppliers.list(filter, page, limit).await?;
    Ok(success_response(PaginatedResponse::new(
        paged.rows,
        paged.total,
        page,
        limit,
    )))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching suppliers"),
        (status = 400, description = "Missing query", body = crate::errors::ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn search_suppliers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state
        .services
        .suppliers
        .search(query.query.as_deref().unwrap_or_default())
        .await?;
    Ok(success_response(rows))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    responses(
        (status = 200, description = "Supplier found"),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let supplier = state.services.suppliers.get(id).await?;
    Ok(success_response(supplier))
}

#[utoipa::path(
    post,
    path = "/api/suppliers",
    request_body = CreateSupplierInput,
    responses(
        (status = 201, description = "Supplier created"),
        (status = 400, description = "Validation failed", body = crate::errors::ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplierInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&input)?;
    let supplier = state.services.suppliers.create(input).await?;
    Ok(created_response(supplier))
}

#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    request_body = UpdateSupplierInput,
    responses(
        (status = 200, description = "Supplier updated"),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateSupplierInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&input)?;
    let supplier = state.services.suppliers.update(id, input).await?;
    Ok(success_response(supplier))
}

#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    responses(
        (status = 200, description = "Supplier deactivated"),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let supplier = state.services.suppliers.delete(id).await?;
    Ok(super::common::success_with_message(
        "Supplier deactivated",
        supplier,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}/permanent",
    responses(
        (status = 200, description = "Supplier removed"),
        (status = 400, description = "Supplier still referenced", body = crate::errors::ErrorResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn delete_supplier_permanent(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.suppliers.delete_permanent(id).await?;
    Ok(message_response("Supplier permanently deleted"))
}
