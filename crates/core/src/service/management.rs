use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::catalog::CatalogStore;
use crate::domain::brand::{Brand, BrandId, BRAND_NAME_MAX_LEN};
use crate::domain::category::{Category, CategoryId};
use crate::domain::item::{validate_price, Item, ItemId, ItemStatus};
use crate::domain::validated_name;
use crate::errors::ApplicationError;
use crate::service::require_positive_id;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub brand_id: i64,
    pub category_id: i64,
    pub price: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub price: i64,
    #[serde(default)]
    pub status: Option<ItemStatus>,
}

/// Write side of the catalog: brand and item maintenance plus the listings
/// that back the admin surface.
#[derive(Clone)]
pub struct CatalogManagementService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogManagementService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApplicationError> {
        self.store.list_categories().await
    }

    pub async fn list_brands(&self) -> Result<Vec<Brand>, ApplicationError> {
        self.store.list_brands().await
    }

    pub async fn list_items(&self) -> Result<Vec<Item>, ApplicationError> {
        self.store.list_items().await
    }

    pub async fn create_brand(&self, name: &str) -> Result<Brand, ApplicationError> {
        let name = validated_name("brand.name", name, BRAND_NAME_MAX_LEN)?;
        self.ensure_brand_name_free(&name, None).await?;

        let brand = self.store.insert_brand(&name).await?;
        info!(
            event_name = "catalog.brand.created",
            brand_id = brand.id.0,
            brand = %brand.name,
            "brand created"
        );
        Ok(brand)
    }

    pub async fn rename_brand(&self, id: i64, name: &str) -> Result<Brand, ApplicationError> {
        let existing = self.brand(id).await?;
        let renamed = existing.renamed(name)?;
        self.ensure_brand_name_free(&renamed.name, Some(renamed.id)).await?;

        self.store.update_brand(&renamed).await?;
        info!(
            event_name = "catalog.brand.renamed",
            brand_id = renamed.id.0,
            from = %existing.name,
            to = %renamed.name,
            "brand renamed"
        );
        Ok(renamed)
    }

    pub async fn delete_brand(&self, id: i64) -> Result<(), ApplicationError> {
        let brand = self.brand(id).await?;

        let live_items = self.store.count_live_items(brand.id).await?;
        if live_items > 0 {
            return Err(ApplicationError::Validation(format!(
                "brand `{}` still has {live_items} item(s); remove them first",
                brand.name
            )));
        }

        self.store.delete_brand(brand.id).await?;
        info!(event_name = "catalog.brand.deleted", brand_id = brand.id.0, "brand deleted");
        Ok(())
    }

    pub async fn create_item(&self, request: NewItem) -> Result<Item, ApplicationError> {
        validate_price(request.price)?;
        let brand = self.brand(request.brand_id).await?;
        let category = self.category(request.category_id).await?;

        let item = self.store.insert_item(&category, &brand, request.price).await?;
        info!(
            event_name = "catalog.item.created",
            item_id = item.id.0,
            brand = %brand.name,
            category = %category.name,
            price = item.price,
            "item created"
        );
        Ok(item)
    }

    pub async fn update_item(&self, id: i64, update: ItemUpdate) -> Result<Item, ApplicationError> {
        validate_price(update.price)?;
        if update.status == Some(ItemStatus::Removed) {
            return Err(ApplicationError::Validation(
                "items are removed through the delete operation".into(),
            ));
        }

        let mut item = self.item(id).await?;
        item.price = update.price;
        if let Some(status) = update.status {
            item.status = status;
        }

        self.store.update_item(&item).await?;
        info!(
            event_name = "catalog.item.updated",
            item_id = item.id.0,
            price = item.price,
            status = item.status.as_str(),
            "item updated"
        );
        Ok(item)
    }

    /// Soft delete: the item stays stored with [`ItemStatus::Removed`].
    pub async fn remove_item(&self, id: i64) -> Result<(), ApplicationError> {
        let mut item = self.item(id).await?;
        item.status = ItemStatus::Removed;

        self.store.update_item(&item).await?;
        info!(event_name = "catalog.item.removed", item_id = item.id.0, "item removed");
        Ok(())
    }

    async fn brand(&self, id: i64) -> Result<Brand, ApplicationError> {
        require_positive_id("brand", id)?;
        self.store
            .find_brand(BrandId(id))
            .await?
            .ok_or_else(|| ApplicationError::not_found("brand", id))
    }

    async fn category(&self, id: i64) -> Result<Category, ApplicationError> {
        require_positive_id("category", id)?;
        self.store
            .find_category(CategoryId(id))
            .await?
            .ok_or_else(|| ApplicationError::not_found("category", id))
    }

    async fn item(&self, id: i64) -> Result<Item, ApplicationError> {
        require_positive_id("item", id)?;
        self.store
            .find_item(ItemId(id))
            .await?
            .filter(|item| item.status != ItemStatus::Removed)
            .ok_or_else(|| ApplicationError::not_found("item", id))
    }

    async fn ensure_brand_name_free(
        &self,
        name: &str,
        owner: Option<BrandId>,
    ) -> Result<(), ApplicationError> {
        match self.store.find_brand_by_name(name).await? {
            Some(existing) if Some(existing.id) != owner => Err(ApplicationError::Validation(
                format!("brand name `{name}` already exists"),
            )),
            _ => Ok(()),
        }
    }
}
