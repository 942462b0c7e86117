use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::brand::BrandId;
use crate::domain::item::{Item, ItemId};
use crate::outfit::completeness::covers_all_categories;
use crate::outfit::selector::min_per_brand_category;
use crate::outfit::{checked_total, OutfitError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPrice {
    #[serde(skip_serializing)]
    pub item_id: ItemId,
    pub category: String,
    pub price: i64,
}

/// Cheapest outfit that a single brand can supply on its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowestBrandOutfit {
    #[serde(skip_serializing)]
    pub brand_id: BrandId,
    pub brand: String,
    pub categories: Vec<CategoryPrice>,
    pub total_price: i64,
}

/// Orders `(brand id, total)` pairs: lower total first, equal totals fall back
/// to the lower brand id.
pub fn compare_brand_totals(left: (BrandId, i64), right: (BrandId, i64)) -> Ordering {
    match left.1.cmp(&right.1) {
        Ordering::Less => Ordering::Less,
        Ordering::Greater => Ordering::Greater,
        Ordering::Equal => left.0.cmp(&right.0),
    }
}

struct BrandCandidate<'a> {
    brand_id: BrandId,
    total: i64,
    picks: Vec<&'a Item>,
}

/// Finds the brand whose per-category minimums cover every category at the
/// lowest total.
pub fn assemble_lowest_by_brand(
    items: &[Item],
    required_count: u64,
) -> Result<LowestBrandOutfit, OutfitError> {
    let insufficient = || OutfitError::InsufficientCombination { required: required_count };

    if items.is_empty() {
        return Err(insufficient());
    }

    let mut by_brand: BTreeMap<BrandId, Vec<&Item>> = BTreeMap::new();
    for pick in min_per_brand_category(items) {
        by_brand.entry(pick.brand.id).or_default().push(pick);
    }

    let candidates = by_brand
        .into_iter()
        .filter(|(_, picks)| covers_all_categories(picks.iter().copied(), required_count))
        .map(|(brand_id, picks)| {
            let total = checked_total(picks.iter().copied())?;
            Ok::<_, OutfitError>(BrandCandidate { brand_id, total, picks })
        })
        .collect::<Result<Vec<_>, OutfitError>>()?;

    let winner = candidates
        .into_iter()
        .reduce(|best, candidate| {
            match compare_brand_totals(
                (candidate.brand_id, candidate.total),
                (best.brand_id, best.total),
            ) {
                Ordering::Less => candidate,
                Ordering::Equal | Ordering::Greater => best,
            }
        })
        .ok_or_else(insufficient)?;

    let brand = winner.picks.first().map(|item| item.brand.name.clone()).unwrap_or_default();
    let categories = winner
        .picks
        .iter()
        .map(|item| CategoryPrice {
            item_id: item.id,
            category: item.category.name.clone(),
            price: item.price,
        })
        .collect();

    Ok(LowestBrandOutfit {
        brand_id: winner.brand_id,
        brand,
        categories,
        total_price: winner.total,
    })
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{assemble_lowest_by_brand, compare_brand_totals};
    use crate::domain::brand::BrandId;
    use crate::outfit::fixtures::{brand, category, item};
    use crate::outfit::OutfitError;

    #[test]
    fn comparator_prefers_lower_total_then_lower_id() {
        assert_eq!(compare_brand_totals((BrandId(9), 100), (BrandId(1), 200)), Ordering::Less);
        assert_eq!(compare_brand_totals((BrandId(1), 300), (BrandId(9), 200)), Ordering::Greater);
        assert_eq!(compare_brand_totals((BrandId(2), 200), (BrandId(5), 200)), Ordering::Less);
        assert_eq!(compare_brand_totals((BrandId(5), 200), (BrandId(2), 200)), Ordering::Greater);
    }

    #[test]
    fn incomplete_brand_is_disqualified() {
        let top = category(1, "TOP");
        let outer = category(2, "OUTER");
        let pants = category(3, "PANTS");
        let a = brand(1, "A");
        let b = brand(2, "B");
        let items = vec![
            item(1, &top, &a, 15000),
            item(2, &outer, &a, 20000),
            item(3, &top, &b, 10000),
            item(4, &outer, &b, 12000),
            item(5, &pants, &b, 18000),
        ];

        let outfit = assemble_lowest_by_brand(&items, 3).expect("brand B is complete");

        assert_eq!(outfit.brand, "B");
        assert_eq!(outfit.total_price, 40000);
        let categories: Vec<_> =
            outfit.categories.iter().map(|entry| entry.category.as_str()).collect();
        assert_eq!(categories, vec!["TOP", "OUTER", "PANTS"]);
    }

    #[test]
    fn only_complete_brand_wins_even_when_more_expensive() {
        let top = category(1, "TOP");
        let cap = category(2, "CAP");
        let cheap = brand(1, "Cheap");
        let full = brand(2, "Full");
        let items = vec![
            item(1, &top, &cheap, 10),
            item(2, &top, &full, 50000),
            item(3, &cap, &full, 40000),
        ];

        let outfit = assemble_lowest_by_brand(&items, 2).expect("complete brand exists");
        assert_eq!(outfit.brand, "Full");
        assert_eq!(outfit.total_price, 90000);
    }

    #[test]
    fn equal_totals_resolve_to_smaller_brand_id() {
        let top = category(1, "TOP");
        let cap = category(2, "CAP");
        let later = brand(8, "Later");
        let earlier = brand(3, "Earlier");
        let items = vec![
            item(1, &top, &later, 1000),
            item(2, &cap, &later, 500),
            item(3, &top, &earlier, 900),
            item(4, &cap, &earlier, 600),
        ];

        let outfit = assemble_lowest_by_brand(&items, 2).expect("both brands complete");
        assert_eq!(outfit.brand_id, BrandId(3));

        let mut reversed = items;
        reversed.reverse();
        let reversed_outfit = assemble_lowest_by_brand(&reversed, 2).expect("same result");
        assert_eq!(reversed_outfit.brand_id, BrandId(3));
    }

    #[test]
    fn overflowing_brand_total_is_an_error() {
        let top = category(1, "TOP");
        let cap = category(2, "CAP");
        let a = brand(1, "A");
        let items = vec![item(1, &top, &a, i64::MAX), item(2, &cap, &a, i64::MAX)];

        assert_eq!(assemble_lowest_by_brand(&items, 2), Err(OutfitError::TotalOverflow));
    }

    #[test]
    fn brand_total_uses_cheapest_item_per_category() {
        let top = category(1, "TOP");
        let a = brand(1, "A");
        let items = vec![item(1, &top, &a, 900), item(2, &top, &a, 700), item(3, &top, &a, 700)];

        let outfit = assemble_lowest_by_brand(&items, 1).expect("complete");
        assert_eq!(outfit.total_price, 700);
        assert_eq!(outfit.categories.len(), 1);
        assert_eq!(outfit.categories[0].item_id.0, 2);
    }

    #[test]
    fn no_complete_brand_is_insufficient() {
        let top = category(1, "TOP");
        let cap = category(2, "CAP");
        let a = brand(1, "A");
        let b = brand(2, "B");
        let items = vec![item(1, &top, &a, 100), item(2, &cap, &b, 100)];

        assert_eq!(
            assemble_lowest_by_brand(&items, 2),
            Err(OutfitError::InsufficientCombination { required: 2 })
        );
    }

    #[test]
    fn empty_input_is_insufficient() {
        assert_eq!(
            assemble_lowest_by_brand(&[], 0),
            Err(OutfitError::InsufficientCombination { required: 0 })
        );
    }
}
