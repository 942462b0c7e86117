//! Outfit selection engine.
//!
//! Everything in this module is a pure function over an already-fetched
//! snapshot of items: grouping, min/max selection with a fixed tie-break,
//! completeness checks and brand-total comparison. Nothing here performs I/O.

pub mod brand_set;
pub mod category_set;
pub mod completeness;
pub mod price_range;
pub mod selector;

use thiserror::Error;

use crate::domain::item::Item;

pub use brand_set::{
    assemble_lowest_by_brand, compare_brand_totals, CategoryPrice, LowestBrandOutfit,
};
pub use category_set::{assemble_lowest_by_category, CategoryPick, LowestCategoryOutfit};
pub use completeness::covers_all_categories;
pub use price_range::{find_price_range, BrandPrice, CategoryPriceRange};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OutfitError {
    #[error("no combination covers all {required} categories; some categories may have no items")]
    InsufficientCombination { required: u64 },
    #[error("category `{category}` has no items available for sale")]
    CategoryEmpty { category: String },
    #[error("outfit total exceeds the representable price range")]
    TotalOverflow,
}

/// Sums item prices, failing instead of wrapping.
pub(crate) fn checked_total<'a, I>(items: I) -> Result<i64, OutfitError>
where
    I: IntoIterator<Item = &'a Item>,
{
    items.into_iter().try_fold(0_i64, |total, item| {
        total.checked_add(item.price).ok_or(OutfitError::TotalOverflow)
    })
}
