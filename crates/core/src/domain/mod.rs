pub mod brand;
pub mod category;
pub mod item;

use crate::errors::DomainError;

/// Trims `value` and checks it against the naming rules shared by brands and
/// categories.
pub(crate) fn validated_name(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName { field, reason: "must not be blank".to_string() });
    }

    let length = trimmed.chars().count();
    if length > max_len {
        return Err(DomainError::InvalidName {
            field,
            reason: format!("must be at most {max_len} characters (got {length})"),
        });
    }

    Ok(trimmed.to_string())
}
