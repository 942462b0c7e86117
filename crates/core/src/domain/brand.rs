use serde::{Deserialize, Serialize};

use crate::domain::validated_name;
use crate::errors::DomainError;

pub const BRAND_NAME_MAX_LEN: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandId(pub i64);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
}

impl Brand {
    pub fn new(id: BrandId, name: &str) -> Result<Self, DomainError> {
        let name = validated_name("brand.name", name, BRAND_NAME_MAX_LEN)?;
        Ok(Self { id, name })
    }

    pub fn renamed(&self, name: &str) -> Result<Self, DomainError> {
        Self::new(self.id, name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Brand, BrandId};

    #[test]
    fn brand_names_are_trimmed() {
        let brand = Brand::new(BrandId(3), "  Acme ").expect("valid brand");
        assert_eq!(brand.name, "Acme");
    }

    #[test]
    fn rename_keeps_identity() {
        let brand = Brand::new(BrandId(7), "Old").expect("valid brand");
        let renamed = brand.renamed("New").expect("valid rename");

        assert_eq!(renamed.id, BrandId(7));
        assert_eq!(renamed.name, "New");
        assert!(brand.renamed(&"b".repeat(101)).is_err());
    }
}
