//! Grouped minimum/maximum selection.
//!
//! Ties on price always resolve to the smaller item id, for both the minimum
//! and the maximum rule, so every selection is independent of input order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::brand::BrandId;
use crate::domain::category::CategoryId;
use crate::domain::item::Item;

/// Price ascending, then id ascending.
pub fn cheapest_first(left: &Item, right: &Item) -> Ordering {
    left.price.cmp(&right.price).then_with(|| left.id.cmp(&right.id))
}

/// Price descending, then id ascending.
pub fn priciest_first(left: &Item, right: &Item) -> Ordering {
    right.price.cmp(&left.price).then_with(|| left.id.cmp(&right.id))
}

fn select_by<'a, I>(items: I, order: fn(&Item, &Item) -> Ordering) -> Option<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items.into_iter().fold(None, |best, candidate| match best {
        Some(current) if order(current, candidate) != Ordering::Greater => Some(current),
        _ => Some(candidate),
    })
}

pub fn select_min<'a, I>(items: I) -> Option<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    select_by(items, cheapest_first)
}

pub fn select_max<'a, I>(items: I) -> Option<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    select_by(items, priciest_first)
}

fn group_active<K, F>(items: &[Item], key: F) -> BTreeMap<K, Vec<&Item>>
where
    K: Ord,
    F: Fn(&Item) -> K,
{
    let mut groups: BTreeMap<K, Vec<&Item>> = BTreeMap::new();
    for item in items.iter().filter(|item| item.is_active()) {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

/// One cheapest active item per category, ordered by category id.
pub fn min_per_category(items: &[Item]) -> Vec<&Item> {
    group_active(items, |item| item.category.id)
        .into_values()
        .filter_map(|group| select_min(group))
        .collect()
}

/// One cheapest active item per (brand, category) pair, ordered by brand id
/// and then category id.
pub fn min_per_brand_category(items: &[Item]) -> Vec<&Item> {
    group_active(items, |item| -> (BrandId, CategoryId) { (item.brand.id, item.category.id) })
        .into_values()
        .filter_map(|group| select_min(group))
        .collect()
}
