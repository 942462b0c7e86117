use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use outfitter_core::domain::brand::Brand;
use outfitter_core::domain::category::Category;
use outfitter_core::domain::item::{Item, ItemStatus};
use outfitter_core::outfit::{CategoryPriceRange, LowestBrandOutfit, LowestCategoryOutfit};
use serde::{Deserialize, Serialize};

use super::{ApiResponse, ApiResult, ApiState};

#[derive(Debug, Deserialize)]
pub struct PriceRangeQuery {
    #[serde(default)]
    pub category: String,
}

/// Flat item view used by the listing endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: i64,
    pub category_id: i64,
    pub category: String,
    pub brand_id: i64,
    pub brand: String,
    pub price: i64,
    pub status: ItemStatus,
}

impl From<Item> for ItemView {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.0,
            category_id: item.category.id.0,
            category: item.category.name,
            brand_id: item.brand.id.0,
            brand: item.brand.name,
            price: item.price,
            status: item.status,
        }
    }
}

pub async fn lowest_by_category(
    State(state): State<ApiState>,
) -> ApiResult<LowestCategoryOutfit> {
    let outfit = state.queries.lowest_by_category().await?;
    Ok(Json(ApiResponse::ok(outfit)))
}

pub async fn lowest_by_brand(State(state): State<ApiState>) -> ApiResult<LowestBrandOutfit> {
    let outfit = state.queries.lowest_by_brand().await?;
    Ok(Json(ApiResponse::ok(outfit)))
}

pub async fn price_range(
    State(state): State<ApiState>,
    query: Result<Query<PriceRangeQuery>, QueryRejection>,
) -> ApiResult<CategoryPriceRange> {
    let Query(query) = query?;
    let range = state.queries.price_range(&query.category).await?;
    Ok(Json(ApiResponse::ok(range)))
}

pub async fn list_categories(State(state): State<ApiState>) -> ApiResult<Vec<Category>> {
    Ok(Json(ApiResponse::ok(state.management.list_categories().await?)))
}

pub async fn list_brands(State(state): State<ApiState>) -> ApiResult<Vec<Brand>> {
    Ok(Json(ApiResponse::ok(state.management.list_brands().await?)))
}

pub async fn list_items(State(state): State<ApiState>) -> ApiResult<Vec<ItemView>> {
    let items = state.management.list_items().await?;
    Ok(Json(ApiResponse::ok(items.into_iter().map(ItemView::from).collect())))
}
