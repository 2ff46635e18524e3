/*!
 * # Authorization Module
 *
 * Capability checks for the service layer. A [`Caller`] is a plain
 * identity value (no web-framework session attached); [`authorize`]
 * answers allow/deny for a `resource:action` permission string based
 * on the caller's granted roles.
 */

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub mod permissions;
pub mod rbac;

pub use permissions::{permission_string, Actions, Resources};
pub use rbac::{RbacService, Role, ROLES};

/// Identity of the caller of a service operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: i64,
    pub username: String,
    pub roles: Vec<String>,
}

impl Caller {
    pub fn new(user_id: i64, username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            roles,
        }
    }

    /// Check if the caller has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check if the caller is an admin
    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }
}

/// Check whether the caller's roles grant the required permission.
pub fn has_permission(caller: &Caller, permission: &str) -> bool {
    RbacService::new().roles_grant(&caller.roles, permission)
}

/// Capability check returning `Forbidden` when the caller lacks the
/// required permission.
pub fn authorize(caller: &Caller, permission: &str) -> Result<(), ServiceError> {
    if has_permission(caller, permission) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!(
            "user '{}' lacks permission '{}'",
            caller.username, permission
        )))
    }
}
