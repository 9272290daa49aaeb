use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::config::AppConfig;
use crate::errors::ServiceError;

/// Standard success envelope: `{"status": "success", "data": ...}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

pub fn success_response<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            status: "success".to_string(),
            message: None,
            data,
        }),
    )
        .into_response()
}

pub fn success_with_message<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            status: "success".to_string(),
            message: Some(message.into()),
            data,
        }),
    )
        .into_response()
}

pub fn created_response<T: Serialize>(data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(ApiResponse {
            status: "success".to_string(),
            message: None,
            data,
        }),
    )
        .into_response()
}

/// Success body with no data payload, used by delete endpoints.
pub fn message_response(message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "success",
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Validate request input at the handler boundary.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input.validate().map_err(ServiceError::from)
}

/// Pagination query parameters shared by all list endpoints. The effective
/// limit falls back to the configured default and is capped at the maximum.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, IntoParams)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    pub limit: Option<u64>,
}

fn default_page() -> u64 {
    1
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: None,
        }
    }
}

impl PaginationParams {
    pub fn resolve(&self, config: &AppConfig) -> (u64, u64) {
        let page = self.page.max(1);
        let limit = self
            .limit
            .unwrap_or(config.api_default_page_size)
            .clamp(1, config.api_max_page_size);
        (page, limit)
    }
}

/// Pagination metadata, camelCased on the wire.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub limit: u64,
}

impl PaginationMeta {
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };
        Self {
            total,
            current_page: page,
            total_pages,
            limit,
        }
    }
}

/// Paginated list payload placed under the `data` key.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T: Serialize> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        Self {
            items,
            pagination: PaginationMeta::new(total, page, limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_uses_ceiling_division() {
        assert_eq!(PaginationMeta::new(0, 1, 10).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 1, 10).total_pages, 1);
        assert_eq!(PaginationMeta::new(10, 1, 10).total_pages, 1);
        assert_eq!(PaginationMeta::new(11, 1, 10).total_pages, 2);
        assert_eq!(PaginationMeta::new(95, 1, 10).total_pages, 10);
    }

    #[test]
    fn limit_is_defaulted_and_capped() {
        let config = crate::config::test_config();
        let params = PaginationParams::default();
        assert_eq!(params.resolve(&config), (1, 10));

        let params = PaginationParams {
            page: 0,
            limit: Some(10_000),
        };
        assert_eq!(params.resolve(&config), (1, 100));
    }
}
