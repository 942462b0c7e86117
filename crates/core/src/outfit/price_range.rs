use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::item::{Item, ItemId};
use crate::outfit::selector::{select_max, select_min};
use crate::outfit::OutfitError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandPrice {
    #[serde(skip_serializing)]
    pub item_id: ItemId,
    pub brand: String,
    pub price: i64,
}

impl From<&Item> for BrandPrice {
    fn from(item: &Item) -> Self {
        Self { item_id: item.id, brand: item.brand.name.clone(), price: item.price }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPriceRange {
    pub category: String,
    pub min_price: BrandPrice,
    pub max_price: BrandPrice,
}

/// Cheapest and most expensive active item of `category`. Items belonging to
/// other categories are ignored.
pub fn find_price_range(
    category: &Category,
    items: &[Item],
) -> Result<CategoryPriceRange, OutfitError> {
    let candidates: Vec<&Item> = items
        .iter()
        .filter(|item| item.is_active() && item.category.id == category.id)
        .collect();

    let (Some(min), Some(max)) =
        (select_min(candidates.iter().copied()), select_max(candidates.iter().copied()))
    else {
        return Err(OutfitError::CategoryEmpty { category: category.name.clone() });
    };

    Ok(CategoryPriceRange {
        category: category.name.clone(),
        min_price: BrandPrice::from(min),
        max_price: BrandPrice::from(max),
    })
}
