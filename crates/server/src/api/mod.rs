//! JSON API.
//!
//! Query endpoints:
//! - `GET  /api/v1/outfits/lowest-by-category`       cheapest item per category
//! - `GET  /api/v1/outfits/lowest-by-brand`          cheapest single-brand outfit
//! - `GET  /api/v1/categories/price-range?category=` min and max of one category
//! - `GET  /api/v1/categories`, `/api/v1/brands`, `/api/v1/items`
//!
//! Admin endpoints:
//! - `POST /api/v1/admin/brands`, `PUT|DELETE /api/v1/admin/brands/{id}`
//! - `POST /api/v1/admin/items`,  `PUT|DELETE /api/v1/admin/items/{id}`
//!
//! Every response uses the `{success, data, message, errorCode}` envelope,
//! including malformed paths, query strings and JSON bodies.

mod admin;
mod outfits;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use outfitter_core::errors::{ApplicationError, InterfaceError};
use outfitter_core::service::{CatalogManagementService, OutfitQueryService};
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct ApiState {
    pub queries: OutfitQueryService,
    pub management: CatalogManagementService,
}

impl ApiState {
    pub fn new(queries: OutfitQueryService, management: CatalogManagementService) -> Self {
        Self { queries, management }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/outfits/lowest-by-category", get(outfits::lowest_by_category))
        .route("/api/v1/outfits/lowest-by-brand", get(outfits::lowest_by_brand))
        .route("/api/v1/categories/price-range", get(outfits::price_range))
        .route("/api/v1/categories", get(outfits::list_categories))
        .route("/api/v1/brands", get(outfits::list_brands))
        .route("/api/v1/items", get(outfits::list_items))
        .route("/api/v1/admin/brands", post(admin::create_brand))
        .route("/api/v1/admin/brands/{id}", put(admin::rename_brand).delete(admin::delete_brand))
        .route("/api/v1/admin/items", post(admin::create_item))
        .route("/api/v1/admin/items/{id}", put(admin::update_item).delete(admin::remove_item))
        .with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error_code: None,
            correlation_id: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), ..Self::ok(data) }
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Failed request. Carries the interface error and the id logged alongside it.
#[derive(Debug)]
pub struct ApiError(pub InterfaceError);

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        Self(error.into_interface(Uuid::new_v4().to_string()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApplicationError::Validation(rejection.body_text()).into()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApplicationError::Validation(rejection.body_text()).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApplicationError::Validation(rejection.body_text()).into()
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
            InterfaceError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let interface = self.0;

        // Server-side failures keep their detail in the logs only.
        let message = if status.is_server_error() {
            error!(
                event_name = "api.request.failed",
                correlation_id = interface.correlation_id(),
                error_code = interface.error_code(),
                error = interface.message(),
                "request failed"
            );
            interface.user_message().to_string()
        } else {
            warn!(
                event_name = "api.request.rejected",
                correlation_id = interface.correlation_id(),
                error_code = interface.error_code(),
                error = interface.message(),
                "request rejected"
            );
            interface.message().to_string()
        };

        let body = ApiResponse::<()> {
            success: false,
            data: None,
            message: Some(message),
            error_code: Some(interface.error_code()),
            correlation_id: Some(interface.correlation_id().to_string()),
        };
        (status, Json(body)).into_response()
    }
}
