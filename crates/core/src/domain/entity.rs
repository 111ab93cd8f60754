// Entity contract shared by every record a use case produces

use crate::domain::error::{DomainError, Result};
use serde::Serialize;

/// Immutable record produced by a pure construction step
///
/// Entities are never mutated after construction; an update is a new value.
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// Stable name used as the event prefix (e.g. `post_like`)
    const KIND: &'static str;

    /// Unique identifier of this record
    fn id(&self) -> &str;
}

/// Reject empty or blank identifiers
pub fn require_identifier(field: &'static str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "must not be empty".to_string(),
        });
    }
    if value.trim() != value {
        return Err(DomainError::Validation {
            field,
            message: "must not have surrounding whitespace".to_string(),
        });
    }
    Ok(value)
}
