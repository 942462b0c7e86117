//! Read and write boundaries of the catalog.
//!
//! [`CatalogQuery`] is the only thing the outfit queries consume. Implementors
//! return active items only; they may hand back raw candidate lists or lists
//! already reduced to one minimum per group, since the selector re-applies its
//! rule either way. [`CatalogStore`] is the write-side collaborator used by
//! catalog management.

use async_trait::async_trait;

use crate::domain::brand::{Brand, BrandId};
use crate::domain::category::{Category, CategoryId};
use crate::domain::item::{Item, ItemId};
use crate::errors::ApplicationError;

#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// One active item per category, cheapest first with ties on the lower id.
    async fn min_item_per_category(&self) -> Result<Vec<Item>, ApplicationError>;

    /// One active item per existing (brand, category) pair, same tie-break.
    async fn min_item_per_brand_category(&self) -> Result<Vec<Item>, ApplicationError>;

    async fn category_count(&self) -> Result<u64, ApplicationError>;

    async fn items_in_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Item>, ApplicationError>;

    /// `name` is already normalized with [`Category::normalize_name`].
    async fn find_category_by_name(&self, name: &str)
        -> Result<Option<Category>, ApplicationError>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, ApplicationError>;
    async fn list_brands(&self) -> Result<Vec<Brand>, ApplicationError>;
    /// Every item that has not been removed, ordered by id.
    async fn list_items(&self) -> Result<Vec<Item>, ApplicationError>;

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, ApplicationError>;
    async fn find_brand(&self, id: BrandId) -> Result<Option<Brand>, ApplicationError>;
    async fn find_brand_by_name(&self, name: &str) -> Result<Option<Brand>, ApplicationError>;
    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, ApplicationError>;

    async fn insert_brand(&self, name: &str) -> Result<Brand, ApplicationError>;
    async fn update_brand(&self, brand: &Brand) -> Result<(), ApplicationError>;
    /// Items of the brand that are active or unavailable.
    async fn count_live_items(&self, brand_id: BrandId) -> Result<u64, ApplicationError>;
    /// Deletes the brand together with its removed items.
    async fn delete_brand(&self, brand_id: BrandId) -> Result<(), ApplicationError>;

    async fn insert_item(
        &self,
        category: &Category,
        brand: &Brand,
        price: i64,
    ) -> Result<Item, ApplicationError>;
    async fn update_item(&self, item: &Item) -> Result<(), ApplicationError>;
}
