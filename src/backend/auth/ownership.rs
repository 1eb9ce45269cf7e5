/**
 * Ownership Policy
 *
 * The rule applied by every handler that mutates or deletes an owned
 * resource: only the creator may do it. Plain id equality, no roles or
 * admin override. The deny outcome (403) is distinct from "not found"
 * (404) and is the same for every resource type.
 */

use crate::backend::error::ApiError;

/// May `caller_id` modify a resource owned by `owner_id`?
pub fn can_modify(caller_id: i64, owner_id: i64) -> bool {
    caller_id == owner_id
}

/// Enforce ownership, converting a denial into `ApiError::Forbidden`
pub fn ensure_owner(caller_id: i64, owner_id: i64) -> Result<(), ApiError> {
    if can_modify(caller_id, owner_id) {
        Ok(())
    } else {
        tracing::warn!(
            caller_id,
            owner_id,
            "ownership check denied a mutating request"
        );
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_owner_may_modify() {
        assert!(can_modify(7, 7));
        assert!(ensure_owner(7, 7).is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        assert!(!can_modify(7, 8));
        let err = ensure_owner(7, 8).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_deny_is_distinct_from_not_found() {
        let deny = ensure_owner(1, 2).unwrap_err();
        let missing = ApiError::NotFound("Receipt not found.".into());
        assert_ne!(deny.status_code(), missing.status_code());
    }
}
