use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::CatalogQuery;
use crate::domain::category::Category;
use crate::errors::ApplicationError;
use crate::outfit::{
    assemble_lowest_by_brand, assemble_lowest_by_category, find_price_range, CategoryPriceRange,
    LowestBrandOutfit, LowestCategoryOutfit, OutfitError,
};

/// Answers the three outfit questions over whatever snapshot the catalog
/// port hands back.
#[derive(Clone)]
pub struct OutfitQueryService {
    catalog: Arc<dyn CatalogQuery>,
}

impl OutfitQueryService {
    pub fn new(catalog: Arc<dyn CatalogQuery>) -> Self {
        Self { catalog }
    }

    pub async fn lowest_by_category(&self) -> Result<LowestCategoryOutfit, ApplicationError> {
        let required = self.catalog.category_count().await?;
        let candidates = self.catalog.min_item_per_category().await?;

        let outfit = assemble_lowest_by_category(&candidates, required)
            .map_err(|error| log_outfit_failure("outfit.lowest_by_category", error))?;

        debug!(
            event_name = "outfit.lowest_by_category.answered",
            categories = outfit.items.len(),
            total_price = outfit.total_price,
            "lowest per-category outfit assembled"
        );
        Ok(outfit)
    }

    pub async fn lowest_by_brand(&self) -> Result<LowestBrandOutfit, ApplicationError> {
        let required = self.catalog.category_count().await?;
        let candidates = self.catalog.min_item_per_brand_category().await?;

        let outfit = assemble_lowest_by_brand(&candidates, required)
            .map_err(|error| log_outfit_failure("outfit.lowest_by_brand", error))?;

        debug!(
            event_name = "outfit.lowest_by_brand.answered",
            brand = %outfit.brand,
            total_price = outfit.total_price,
            "lowest single-brand outfit assembled"
        );
        Ok(outfit)
    }

    pub async fn price_range(
        &self,
        category_name: &str,
    ) -> Result<CategoryPriceRange, ApplicationError> {
        let normalized = Category::normalize_name(category_name);
        if normalized.is_empty() {
            return Err(ApplicationError::Validation("category name must not be blank".into()));
        }

        let category = self
            .catalog
            .find_category_by_name(&normalized)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category", &normalized))?;
        let items = self.catalog.items_in_category(category.id).await?;

        let range = find_price_range(&category, &items)
            .map_err(|error| log_outfit_failure("outfit.price_range", error))?;

        debug!(
            event_name = "outfit.price_range.answered",
            category = %range.category,
            min_price = range.min_price.price,
            max_price = range.max_price.price,
            "category price range resolved"
        );
        Ok(range)
    }
}

fn log_outfit_failure(event: &'static str, error: OutfitError) -> ApplicationError {
    warn!(event_name = event, error = %error, "outfit query could not be answered");
    ApplicationError::from(error)
}
