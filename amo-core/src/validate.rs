//! Input-sanity validators.
//!
//! The remote service is authoritative for business semantics; these checks
//! only reject requests that could never be valid (non-positive ids,
//! out-of-range pagination, unknown entity tags) before a request is built.

use crate::constants;
use crate::error::{AmoError, AmoResult};

/// Check that an entity id is positive.
pub fn validate_entity_id(entity_id: i64) -> AmoResult<i64> {
    if entity_id <= 0 {
        return Err(AmoError::validation(format!(
            "entity id must be positive, got {entity_id}"
        )));
    }
    Ok(entity_id)
}

/// Check that every id in a list is positive.
pub fn validate_entity_ids(entity_ids: &[i64]) -> AmoResult<()> {
    for id in entity_ids {
        validate_entity_id(*id)?;
    }
    Ok(())
}

/// Check that a page-size limit is within the provider's `1..=250` range.
pub fn validate_limit(limit: u32) -> AmoResult<u32> {
    if limit == 0 {
        return Err(AmoError::validation("limit must be positive"));
    }
    if limit > constants::MAX_PAGE_SIZE {
        return Err(AmoError::validation(format!(
            "limit must not exceed {}",
            constants::MAX_PAGE_SIZE
        )));
    }
    Ok(limit)
}

/// Check that a page number is at least 1.
pub fn validate_page(page: u32) -> AmoResult<u32> {
    if page == 0 {
        return Err(AmoError::validation("page number must be positive"));
    }
    Ok(page)
}

/// Check that a string is a known entity type tag.
pub fn validate_entity_type(entity_type: &str) -> AmoResult<&str> {
    if !constants::entity_types::ALL.contains(&entity_type) {
        return Err(AmoError::validation(format!(
            "invalid entity type: {entity_type}"
        )));
    }
    Ok(entity_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_bounds() {
        assert_eq!(validate_entity_id(1).unwrap(), 1);
        assert!(validate_entity_id(0).is_err());
        assert!(validate_entity_id(-7).is_err());
    }

    #[test]
    fn test_entity_ids_all_checked() {
        assert!(validate_entity_ids(&[1, 2, 3]).is_ok());
        assert!(validate_entity_ids(&[]).is_ok());
        assert!(validate_entity_ids(&[1, 0, 3]).is_err());
    }

    #[test]
    fn test_limit_boundaries() {
        assert!(validate_limit(0).is_err());
        assert_eq!(validate_limit(1).unwrap(), 1);
        assert_eq!(validate_limit(250).unwrap(), 250);
        assert!(validate_limit(251).is_err());
    }

    #[test]
    fn test_page_boundary() {
        assert!(validate_page(0).is_err());
        assert_eq!(validate_page(1).unwrap(), 1);
    }

    #[test]
    fn test_entity_type_tags() {
        assert!(validate_entity_type("leads").is_ok());
        assert!(validate_entity_type("unicorns").is_err());
    }
}
