pub mod management;
pub mod query;

pub use management::{CatalogManagementService, ItemUpdate, NewItem};
pub use query::OutfitQueryService;

use crate::errors::ApplicationError;

pub(crate) fn require_positive_id(entity: &'static str, raw: i64) -> Result<(), ApplicationError> {
    if raw <= 0 {
        return Err(ApplicationError::Validation(format!(
            "{entity} id must be greater than zero (got {raw})"
        )));
    }
    Ok(())
}
