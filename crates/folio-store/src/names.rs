//! Collection and record name checks.
//!
//! Names are used verbatim as directory and file base names, so the only
//! rule is that they are non-empty. The collection is always checked before
//! the record name, which fixes which field a caller hears about when both
//! are missing.

use crate::error::{NameKind, StoreError, StoreResult};

/// Validate a collection name.
pub fn validate_collection(collection: &str) -> StoreResult<()> {
    if collection.is_empty() {
        return Err(StoreError::MissingName(NameKind::Collection));
    }
    Ok(())
}

/// Validate a record name.
pub fn validate_record(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::MissingName(NameKind::Record));
    }
    Ok(())
}

/// Validate a full `(collection, record)` address.
pub fn validate_address(collection: &str, name: &str) -> StoreResult<()> {
    validate_collection(collection)?;
    validate_record(name)
}
