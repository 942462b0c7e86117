use std::collections::HashSet;

use crate::domain::item::Item;

/// True when the distinct category ids referenced by `items` number exactly
/// `required_count`. Duplicated categories are not detected here; callers pass
/// selector output, which holds at most one item per category.
pub fn covers_all_categories<'a, I>(items: I, required_count: u64) -> bool
where
    I: IntoIterator<Item = &'a Item>,
{
    let distinct: HashSet<_> = items.into_iter().map(|item| item.category.id).collect();
    distinct.len() as u64 == required_count
}

#[cfg(test)]
mod tests {
    use super::covers_all_categories;
    use crate::outfit::fixtures::{brand, category, item};

    #[test]
    fn distinct_category_count_must_match() {
        let top = category(1, "TOP");
        let cap = category(2, "CAP");
        let a = brand(1, "A");
        let items = [item(1, &top, &a, 100), item(2, &cap, &a, 100)];

        assert!(covers_all_categories(&items, 2));
        assert!(!covers_all_categories(&items, 3));
        assert!(!covers_all_categories(&items[..1], 2));
    }

    #[test]
    fn empty_set_only_covers_zero_categories() {
        assert!(covers_all_categories([], 0));
        assert!(!covers_all_categories([], 1));
    }
}
