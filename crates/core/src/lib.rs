pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod outfit;
pub mod service;

pub use catalog::{CatalogQuery, CatalogStore};
pub use domain::brand::{Brand, BrandId};
pub use domain::category::{Category, CategoryId};
pub use domain::item::{Item, ItemId, ItemStatus};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use outfit::{
    CategoryPriceRange, LowestBrandOutfit, LowestCategoryOutfit, OutfitError,
};
pub use service::{CatalogManagementService, ItemUpdate, NewItem, OutfitQueryService};
