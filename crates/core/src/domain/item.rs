use serde::{Deserialize, Serialize};

use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Unavailable,
    Removed,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Unavailable => "unavailable",
            Self::Removed => "removed",
        }
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "unavailable" => Ok(Self::Unavailable),
            "removed" => Ok(Self::Removed),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// A priced product. Only [`ItemStatus::Active`] items take part in outfit
/// selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub category: Category,
    pub brand: Brand,
    pub price: i64,
    pub status: ItemStatus,
}

impl Item {
    pub fn new(
        id: ItemId,
        category: Category,
        brand: Brand,
        price: i64,
        status: ItemStatus,
    ) -> Result<Self, DomainError> {
        validate_price(price)?;
        Ok(Self { id, category, brand, price, status })
    }

    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }
}

/// Largest accepted item price. Keeps any realistic outfit total inside `i64`.
pub const MAX_PRICE: i64 = 1_000_000_000;

pub fn validate_price(price: i64) -> Result<(), DomainError> {
    if !(1..=MAX_PRICE).contains(&price) {
        return Err(DomainError::InvalidPrice(price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_price, Item, ItemId, ItemStatus, MAX_PRICE};
    use crate::domain::brand::{Brand, BrandId};
    use crate::domain::category::{Category, CategoryId};
    use crate::errors::DomainError;

    #[test]
    fn non_positive_price_is_rejected() {
        let category = Category::new(CategoryId(1), "TOP").expect("category");
        let brand = Brand::new(BrandId(1), "A").expect("brand");

        let error = Item::new(ItemId(1), category, brand, 0, ItemStatus::Active)
            .expect_err("zero price should fail");
        assert_eq!(error, DomainError::InvalidPrice(0));
    }

    #[test]
    fn price_above_cap_is_rejected() {
        assert_eq!(validate_price(MAX_PRICE), Ok(()));
        assert_eq!(validate_price(MAX_PRICE + 1), Err(DomainError::InvalidPrice(MAX_PRICE + 1)));
        assert_eq!(validate_price(i64::MAX), Err(DomainError::InvalidPrice(i64::MAX)));
    }

    #[test]
    fn status_uses_the_same_spelling_on_the_wire_and_in_storage() {
        for status in [ItemStatus::Active, ItemStatus::Unavailable, ItemStatus::Removed] {
            let json = serde_json::to_value(status).expect("serialize");
            assert_eq!(json, serde_json::Value::from(status.as_str()));
            assert_eq!(serde_json::from_value::<ItemStatus>(json).expect("deserialize"), status);
        }
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("ACTIVE".parse::<ItemStatus>(), Ok(ItemStatus::Active));
        assert_eq!(" unavailable ".parse::<ItemStatus>(), Ok(ItemStatus::Unavailable));
        assert!("sold_out".parse::<ItemStatus>().is_err());
    }
}
