use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use outfitter_core::catalog::{CatalogQuery, CatalogStore};
use outfitter_core::domain::brand::{Brand, BrandId};
use outfitter_core::domain::category::{Category, CategoryId};
use outfitter_core::domain::item::{Item, ItemId, ItemStatus};
use outfitter_core::errors::ApplicationError;
use outfitter_core::outfit::selector::{min_per_brand_category, min_per_category};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<CategoryId, Category>,
    brands: BTreeMap<BrandId, Brand>,
    items: BTreeMap<ItemId, Item>,
    next_id: i64,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn active_items(&self) -> Vec<Item> {
        self.items.values().filter(|item| item.is_active()).cloned().collect()
    }
}

/// Process-local catalog for tests and embedding. Ids come from a single
/// counter shared by every table.
#[derive(Default)]
pub struct InMemoryCatalogRepository {
    tables: RwLock<Tables>,
}

impl InMemoryCatalogRepository {
    pub async fn with_categories<I, S>(names: I) -> Result<Self, ApplicationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let repository = Self::default();
        for name in names {
            repository.insert_category(name.as_ref()).await?;
        }
        Ok(repository)
    }

    pub async fn insert_category(&self, name: &str) -> Result<Category, ApplicationError> {
        let mut tables = self.tables.write().await;
        let normalized = Category::normalize_name(name);
        if tables.categories.values().any(|category| category.name == normalized) {
            return Err(ApplicationError::Validation(format!(
                "category `{normalized}` already exists"
            )));
        }

        let category = Category::new(CategoryId(tables.allocate_id()), &normalized)?;
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }
}

#[async_trait]
impl CatalogQuery for InMemoryCatalogRepository {
    async fn min_item_per_category(&self) -> Result<Vec<Item>, ApplicationError> {
        let tables = self.tables.read().await;
        let items = tables.active_items();
        Ok(min_per_category(&items).into_iter().cloned().collect())
    }

    async fn min_item_per_brand_category(&self) -> Result<Vec<Item>, ApplicationError> {
        let tables = self.tables.read().await;
        let items = tables.active_items();
        Ok(min_per_brand_category(&items).into_iter().cloned().collect())
    }

    async fn category_count(&self) -> Result<u64, ApplicationError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.len() as u64)
    }

    async fn items_in_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Item>, ApplicationError> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .values()
            .filter(|item| item.is_active() && item.category.id == category_id)
            .cloned()
            .collect())
    }

    async fn find_category_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Category>, ApplicationError> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .find(|category| category.name == name)
            .cloned())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, ApplicationError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().cloned().collect())
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, ApplicationError> {
        let tables = self.tables.read().await;
        Ok(tables.brands.values().cloned().collect())
    }

    async fn list_items(&self) -> Result<Vec<Item>, ApplicationError> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .values()
            .filter(|item| item.status != ItemStatus::Removed)
            .cloned()
            .collect())
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, ApplicationError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.get(&id).cloned())
    }

    async fn find_brand(&self, id: BrandId) -> Result<Option<Brand>, ApplicationError> {
        let tables = self.tables.read().await;
        Ok(tables.brands.get(&id).cloned())
    }

    async fn find_brand_by_name(&self, name: &str) -> Result<Option<Brand>, ApplicationError> {
        let tables = self.tables.read().await;
        Ok(tables.brands.values().find(|brand| brand.name == name).cloned())
    }

    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, ApplicationError> {
        let tables = self.tables.read().await;
        Ok(tables.items.get(&id).cloned())
    }

    async fn insert_brand(&self, name: &str) -> Result<Brand, ApplicationError> {
        let mut tables = self.tables.write().await;
        if tables.brands.values().any(|brand| brand.name == name) {
            return Err(ApplicationError::Validation(format!("brand name `{name}` already exists")));
        }

        let brand = Brand::new(BrandId(tables.allocate_id()), name)?;
        tables.brands.insert(brand.id, brand.clone());
        Ok(brand)
    }

    async fn update_brand(&self, brand: &Brand) -> Result<(), ApplicationError> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.brands.get_mut(&brand.id) else {
            return Err(ApplicationError::not_found("brand", brand.id.0));
        };
        stored.name = brand.name.clone();

        for item in tables.items.values_mut().filter(|item| item.brand.id == brand.id) {
            item.brand.name = brand.name.clone();
        }
        Ok(())
    }

    async fn count_live_items(&self, brand_id: BrandId) -> Result<u64, ApplicationError> {
        let tables = self.tables.read().await;
        let count = tables
            .items
            .values()
            .filter(|item| item.brand.id == brand_id && item.status != ItemStatus::Removed)
            .count();
        Ok(count as u64)
    }

    async fn delete_brand(&self, brand_id: BrandId) -> Result<(), ApplicationError> {
        let mut tables = self.tables.write().await;
        if tables.brands.remove(&brand_id).is_none() {
            return Err(ApplicationError::not_found("brand", brand_id.0));
        }
        tables.items.retain(|_, item| item.brand.id != brand_id);
        Ok(())
    }

    async fn insert_item(
        &self,
        category: &Category,
        brand: &Brand,
        price: i64,
    ) -> Result<Item, ApplicationError> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&category.id) {
            return Err(ApplicationError::not_found("category", category.id.0));
        }
        if !tables.brands.contains_key(&brand.id) {
            return Err(ApplicationError::not_found("brand", brand.id.0));
        }

        let item = Item::new(
            ItemId(tables.allocate_id()),
            category.clone(),
            brand.clone(),
            price,
            ItemStatus::Active,
        )?;
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_item(&self, item: &Item) -> Result<(), ApplicationError> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.items.get_mut(&item.id) else {
            return Err(ApplicationError::not_found("item", item.id.0));
        };
        stored.price = item.price;
        stored.status = item.status;
        Ok(())
    }
}
