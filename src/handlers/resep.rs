use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::common::{
    created_response, message_response, success_response, validate_input, PaginatedResponse,
    PaginationParams,
};
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::resep::{
    CheckResepAvailabilityInput, CreateResepInput, ResepListFilter, UpdateResepInput,
};
use crate::services::suppliers::parse_record_status;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_resep).post(create_resep))
        .route("/kategori", get(kategori_list))
        .route("/search", get(search_resep))
        .route("/check-availability", post(check_availability))
        .route("/:id", get(get_resep).put(update_resep).delete(delete_resep))
        .route("/:id/status", patch(set_status))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ResepListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub kategori: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ResepSearchQuery {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusRequest {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/api/resep",
    params(ResepListQuery),
    responses(
        (status = 200, description = "Paginated recipe list"),
        (status = 400, description = "Invalid filter", body = crate::errors::ErrorResponse)
    ),
    tag = "resep"
)]
pub async fn list_resep(
    State(state): State<AppState>,
    Query(query): Query<ResepListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let params = PaginationParams {
        page: query.page.unwrap_or(1),
        limit: query.limit,
    };
    let (page, limit) = params.resolve(&state.config);
    let filter = ResepListFilter {
        status: parse_record_status(query.status.as_deref())?,
        kategori: query.kategori,
        search: query.search,
    };
    let paged = state.services.resep.list(filter, page, limit).await?;
    Ok(success_response(PaginatedResponse::new(
        paged.rows,
        paged.total,
        page,
        limit,
    )))
}

#[utoipa::path(
    get,
    path = "/api/resep/kategori",
    responses((status = 200, description = "Distinct kategori values")),
    tag = "resep"
)]
pub async fn kategori_list(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let values = state.services.resep.kategori_list().await?;
    Ok(success_response(values))
}

#[utoipa::path(
    get,
    path = "/api/resep/search",
    params(ResepSearchQuery),
    responses(
        (status = 200, description = "Matching recipes"),
        (status = 400, description = "Missing name", body = crate::errors::ErrorResponse)
    ),
    tag = "resep"
)]
pub async fn search_resep(
    State(state): State<AppState>,
    Query(query): Query<ResepSearchQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state
        .services
        .resep
        .search(query.name.as_deref().unwrap_or_default())
        .await?;
    Ok(success_response(rows))
}

#[utoipa::path(
    get,
    path = "/api/resep/{id}",
    responses(
        (status = 200, description = "Recipe with its ingredient list"),
        (status = 404, description = "Recipe not found", body = crate::errors::ErrorResponse)
    ),
    tag = "resep"
)]
pub async fn get_resep(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let view = state.services.resep.get(id).await?;
    Ok(success_response(view))
}

#[utoipa::path(
    post,
    path = "/api/resep",
    request_body = CreateResepInput,
    responses(
        (status = 201, description = "Recipe created"),
        (status = 400, description = "Validation failed or duplicate name", body = crate::errors::ErrorResponse)
    ),
    tag = "resep"
)]
pub async fn create_resep(
    State(state): State<AppState>,
    Json(input): Json<CreateResepInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&input)?;
    let created = state.services.resep.create(input).await?;
    Ok(created_response(created))
}

#[utoipa::path(
    put,
    path = "/api/resep/{id}",
    request_body = UpdateResepInput,
    responses(
        (status = 200, description = "Recipe updated"),
        (status = 404, description = "Recipe not found", body = crate::errors::ErrorResponse)
    ),
    tag = "resep"
)]
pub async fn update_resep(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateResepInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&input)?;
    let updated = state.services.resep.update(id, input).await?;
    Ok(success_response(updated))
}

#[utoipa::path(
    patch,
    path = "/api/resep/{id}/status",
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Invalid status", body = crate::errors::ErrorResponse)
    ),
    tag = "resep"
)]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.resep.set_status(id, &request.status).await?;
    Ok(success_response(updated))
}

#[utoipa::path(
    delete,
    path = "/api/resep/{id}",
    responses(
        (status = 200, description = "Recipe deleted"),
        (status = 404, description = "Recipe not found", body = crate::errors::ErrorResponse)
    ),
    tag = "resep"
)]
pub async fn delete_resep(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.resep.delete(id).await?;
    Ok(message_response("Resep deleted"))
}

#[utoipa::path(
    post,
    path = "/api/resep/check-availability",
    request_body = CheckResepAvailabilityInput,
    responses((status = 200, description = "Availability of the name")),
    tag = "resep"
)]
pub async fn check_availability(
    State(state): State<AppState>,
    Json(input): Json<CheckResepAvailabilityInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let available = state.services.resep.check_availability(&input).await?;
    Ok(success_response(serde_json::json!({
        "nama_resep": input.nama_resep,
        "available": available,
    })))
}
