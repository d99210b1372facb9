//! Role-gated access checks.
//!
//! The required role set for an operation is plain data passed explicitly at
//! the call site, keeping the authorization policy auditable independent of
//! handler bodies.

use crate::error::ApiError;
use crate::models::{Role, User};

/// Admit the user when the required set is empty (any authenticated
/// principal) or when the user holds at least one required role.
pub fn require_roles(user: &User, required: &[Role]) -> Result<(), ApiError> {
    if required.is_empty() {
        return Ok(());
    }
    if required.iter().any(|role| user.has_role(*role)) {
        return Ok(());
    }
    Err(ApiError::forbidden(format!(
        "User {} needs a valid role: [{}]",
        user.full_name,
        required
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    )))
}
