use serde::{Deserialize, Serialize};

use crate::domain::validated_name;
use crate::errors::DomainError;

pub const CATEGORY_NAME_MAX_LEN: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    /// Names are stored normalized so lookups compare them verbatim.
    pub fn new(id: CategoryId, name: &str) -> Result<Self, DomainError> {
        let name = validated_name("category.name", name, CATEGORY_NAME_MAX_LEN)?;
        Ok(Self { id, name: Self::normalize_name(&name) })
    }

    /// Trimmed and upper-cased with full Unicode case mapping.
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryId};
    use crate::errors::DomainError;

    #[test]
    fn blank_category_name_is_rejected() {
        let error = Category::new(CategoryId(1), "   ").expect_err("blank name should fail");
        assert!(matches!(error, DomainError::InvalidName { field: "category.name", .. }));
    }

    #[test]
    fn category_name_longer_than_fifty_chars_is_rejected() {
        let name = "X".repeat(51);
        assert!(Category::new(CategoryId(1), &name).is_err());
        assert!(Category::new(CategoryId(1), &"X".repeat(50)).is_ok());
    }

    #[test]
    fn lookup_names_are_upper_cased() {
        assert_eq!(Category::normalize_name(" outer "), "OUTER");
        assert_eq!(Category::normalize_name("écharpe"), "ÉCHARPE");
    }

    #[test]
    fn constructed_names_are_stored_normalized() {
        let category = Category::new(CategoryId(1), " écharpe ").expect("category");
        assert_eq!(category.name, "ÉCHARPE");
    }
}
