use serde::Serialize;

use crate::domain::item::{Item, ItemId};
use crate::outfit::completeness::covers_all_categories;
use crate::outfit::selector::min_per_category;
use crate::outfit::{checked_total, OutfitError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPick {
    #[serde(skip_serializing)]
    pub item_id: ItemId,
    pub category: String,
    pub brand: String,
    pub price: i64,
}

impl From<&Item> for CategoryPick {
    fn from(item: &Item) -> Self {
        Self {
            item_id: item.id,
            category: item.category.name.clone(),
            brand: item.brand.name.clone(),
            price: item.price,
        }
    }
}

/// Cheapest item of every category, brands mixed freely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowestCategoryOutfit {
    pub items: Vec<CategoryPick>,
    pub total_price: i64,
}

/// Picks the cheapest active item per category and requires the picks to cover
/// all `required_count` categories. Winners come back ordered by category id.
///
/// An empty winner list fails even when `required_count` is zero: a catalog
/// without categories has no outfit to offer.
pub fn assemble_lowest_by_category(
    items: &[Item],
    required_count: u64,
) -> Result<LowestCategoryOutfit, OutfitError> {
    let winners = min_per_category(items);

    if winners.is_empty() || !covers_all_categories(winners.iter().copied(), required_count) {
        return Err(OutfitError::InsufficientCombination { required: required_count });
    }

    let total_price = checked_total(winners.iter().copied())?;
    let items = winners.into_iter().map(CategoryPick::from).collect();

    Ok(LowestCategoryOutfit { items, total_price })
}

#[cfg(test)]
mod tests {
    use super::assemble_lowest_by_category;
    use crate::domain::item::{ItemId, ItemStatus};
    use crate::outfit::fixtures::{brand, category, item};
    use crate::outfit::OutfitError;

    #[test]
    fn one_winner_per_category_with_summed_total() {
        let top = category(1, "TOP");
        let outer = category(2, "OUTER");
        let pants = category(3, "PANTS");
        let a = brand(1, "A");
        let b = brand(2, "B");
        let items = vec![
            item(1, &top, &a, 10000),
            item(2, &outer, &b, 5000),
            item(3, &pants, &a, 8000),
        ];

        let outfit = assemble_lowest_by_category(&items, 3).expect("complete outfit");

        assert_eq!(outfit.items.len(), 3);
        assert_eq!(outfit.total_price, 23000);
        let categories: Vec<_> = outfit.items.iter().map(|pick| pick.category.as_str()).collect();
        assert_eq!(categories, vec!["TOP", "OUTER", "PANTS"]);
        assert_eq!(outfit.items[1].brand, "B");
    }

    #[test]
    fn cheapest_item_wins_within_each_category() {
        let top = category(1, "TOP");
        let cap = category(2, "CAP");
        let a = brand(1, "A");
        let b = brand(2, "B");
        let items = vec![
            item(1, &top, &a, 11200),
            item(2, &top, &b, 10500),
            item(3, &cap, &a, 1700),
            item(4, &cap, &b, 1700),
        ];

        let outfit = assemble_lowest_by_category(&items, 2).expect("complete outfit");

        let ids: Vec<_> = outfit.items.iter().map(|pick| pick.item_id).collect();
        assert_eq!(ids, vec![ItemId(2), ItemId(3)]);
        assert_eq!(outfit.total_price, 12200);
    }

    #[test]
    fn category_without_active_items_is_insufficient() {
        let top = category(1, "TOP");
        let cap = category(2, "CAP");
        let a = brand(1, "A");
        let mut sold_out = item(2, &cap, &a, 1500);
        sold_out.status = ItemStatus::Unavailable;
        let items = vec![item(1, &top, &a, 10000), sold_out];

        assert_eq!(
            assemble_lowest_by_category(&items, 2),
            Err(OutfitError::InsufficientCombination { required: 2 })
        );
    }

    #[test]
    fn total_past_i64_range_is_an_error_not_a_wrap() {
        let top = category(1, "TOP");
        let cap = category(2, "CAP");
        let a = brand(1, "A");
        let items = vec![item(1, &top, &a, i64::MAX), item(2, &cap, &a, i64::MAX)];

        assert_eq!(assemble_lowest_by_category(&items, 2), Err(OutfitError::TotalOverflow));
    }

    #[test]
    fn zero_categories_is_treated_as_insufficient() {
        assert_eq!(
            assemble_lowest_by_category(&[], 0),
            Err(OutfitError::InsufficientCombination { required: 0 })
        );
    }

    #[test]
    fn serialized_shape_hides_item_ids() {
        let top = category(1, "TOP");
        let a = brand(1, "A");
        let outfit = assemble_lowest_by_category(&[item(9, &top, &a, 100)], 1).expect("outfit");

        let json = serde_json::to_value(&outfit).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "items": [{"category": "TOP", "brand": "A", "price": 100}],
                "totalPrice": 100
            })
        );
    }
}
