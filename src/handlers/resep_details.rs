use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post, put},
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
use crate::services::resep_details::{
    BatchCreateResepDetailsInput, BatchUpdateResepDetailsInput, CreateResepDetailInput,
    ResepDetailListFilter, UpdateResepDetailInput,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_details).post(create_detail))
        .route("/batch", post(batch_create))
        .route("/:id", get(get_detail).patch(update_detail).delete(delete_detail))
        .route("/resep/:id_resep", get(list_for_resep))
        .route("/resep/:id_resep/batch", put(batch_update))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ResepDetailListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub id_resep: Option<i32>,
    pub id_bahan_baku: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/resep-details",
    params(ResepDetailListQuery),
    responses((status = 200, description = "Paginated ingredient lines")),
    tag = "resep-details"
)]
pub async fn list_details(
    State(state): State<AppState>,
    Query(query): Query<ResepDetailListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let params = PaginationParams {
        page: query.page.unwrap_or(1),
        limit: query.limit,
    };
    let (page, limit) = params.resolve(&state.config);
    let filter = ResepDetailListFilter {
        id_resep: query.id_resep,
        id_bahan_baku: query.id_bahan_baku,
    };
    let paged = state
        .services
        .resep_details
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
    path = "/api/resep-details/{id}",
    responses(
        (status = 200, description = "Ingredient line found"),
        (status = 404, description = "Ingredient line not found", body = crate::errors::ErrorResponse)
    ),
    tag = "resep-details"
)]
pub async fn get_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let view = state.services.resep_details.get(id).await?;
    Ok(success_response(view))
}

#[utoipa::path(
    get,
    path = "/api/resep-details/resep/{id_resep}",
    responses(
        (status = 200, description = "Ingredient lines of one recipe"),
        (status = 404, description = "Recipe not found", body = crate::errors::ErrorResponse)
    ),
    tag = "resep-details"
)]
pub async fn list_for_resep(
    State(state): State<AppState>,
    Path(id_resep): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.services.resep_details.list_for_resep(id_resep).await?;
    Ok(success_response(rows))
}

#[utoipa::path(
    post,
    path = "/api/resep-details",
    request_body = CreateResepDetailInput,
    responses(
        (status = 201, description = "Ingredient line created"),
        (status = 400, description = "Validation failed or duplicate pair", body = crate::errors::ErrorResponse),
        (status = 404, description = "Recipe or material not found", body = crate::errors::ErrorResponse)
    ),
    tag = "resep-details"
)]
pub async fn create_detail(
    State(state): State<AppState>,
    Json(input): Json<CreateResepDetailInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&input)?;
    let created = state.services.resep_details.create(input).await?;
    Ok(created_response(created))
}

#[utoipa::path(
    post,
    path = "/api/resep-details/batch",
    request_body = BatchCreateResepDetailsInput,
    responses(
        (status = 201, description = "Ingredient lines created, possibly with warnings"),
        (status = 400, description = "Nothing insertable", body = crate::errors::ErrorResponse)
    ),
    tag = "resep-details"
)]
pub async fn batch_create(
    State(state): State<AppState>,
    Json(input): Json<BatchCreateResepDetailsInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state.services.resep_details.batch_create(input).await?;
    Ok(created_response(report))
}

#[utoipa::path(
    patch,
    path = "/api/resep-details/{id}",
    request_body = UpdateResepDetailInput,
    responses(
        (status = 200, description = "Ingredient line updated"),
        (status = 404, description = "Ingredient line not found", body = crate::errors::ErrorResponse)
    ),
    tag = "resep-details"
)]
pub async fn update_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateResepDetailInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&input)?;
    let updated = state.services.resep_details.update(id, input).await?;
    Ok(success_response(updated))
}

#[utoipa::path(
    put,
    path = "/api/resep-details/resep/{id_resep}/batch",
    request_body = BatchUpdateResepDetailsInput,
    responses(
        (status = 200, description = "Per-item update report"),
        (status = 404, description = "Recipe not found", body = crate::errors::ErrorResponse)
    ),
    tag = "resep-details"
)]
pub async fn batch_update(
    State(state): State<AppState>,
    Path(id_resep): Path<i32>,
    Json(input): Json<BatchUpdateResepDetailsInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state
        .services
        .resep_details
        .batch_update(id_resep, input)
        .await?;
    Ok(success_response(report))
}

#[utoipa::path(
    delete,
    path = "/api/resep-details/{id}",
    responses(
        (status = 200, description = "Ingredient line deleted"),
        (status = 404, description = "Ingredient line not found", body = crate::errors::ErrorResponse)
    ),
    tag = "resep-details"
)]
pub async fn delete_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.resep_details.delete(id).await?;
    Ok(message_response("Resep detail deleted"))
}
