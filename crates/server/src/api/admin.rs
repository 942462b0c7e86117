use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use outfitter_core::domain::brand::Brand;
use outfitter_core::service::{ItemUpdate, NewItem};
use serde::Deserialize;

use super::outfits::ItemView;
use super::{ApiError, ApiResponse, ApiResult, ApiState};

type JsonBody<T> = Result<Json<T>, JsonRejection>;
type IdPath = Result<Path<i64>, PathRejection>;

#[derive(Debug, Deserialize)]
pub struct BrandRequest {
    pub name: String,
}

pub async fn create_brand(
    State(state): State<ApiState>,
    body: JsonBody<BrandRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Brand>>), ApiError> {
    let Json(body) = body?;
    let brand = state.management.create_brand(&body.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok_with_message(brand, "brand created"))))
}

pub async fn rename_brand(
    State(state): State<ApiState>,
    id: IdPath,
    body: JsonBody<BrandRequest>,
) -> ApiResult<Brand> {
    let Path(id) = id?;
    let Json(body) = body?;
    let brand = state.management.rename_brand(id, &body.name).await?;
    Ok(Json(ApiResponse::ok_with_message(brand, "brand updated")))
}

pub async fn delete_brand(State(state): State<ApiState>, id: IdPath) -> ApiResult<()> {
    let Path(id) = id?;
    state.management.delete_brand(id).await?;
    Ok(Json(ApiResponse::ok_with_message((), "brand deleted")))
}

pub async fn create_item(
    State(state): State<ApiState>,
    body: JsonBody<NewItem>,
) -> Result<(StatusCode, Json<ApiResponse<ItemView>>), ApiError> {
    let Json(body) = body?;
    let item = state.management.create_item(body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok_with_message(item.into(), "item created"))))
}

pub async fn update_item(
    State(state): State<ApiState>,
    id: IdPath,
    body: JsonBody<ItemUpdate>,
) -> ApiResult<ItemView> {
    let Path(id) = id?;
    let Json(body) = body?;
    let item = state.management.update_item(id, body).await?;
    Ok(Json(ApiResponse::ok_with_message(item.into(), "item updated")))
}

pub async fn remove_item(State(state): State<ApiState>, id: IdPath) -> ApiResult<()> {
    let Path(id) = id?;
    state.management.remove_item(id).await?;
    Ok(Json(ApiResponse::ok_with_message((), "item removed")))
}
