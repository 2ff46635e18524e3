/*!
 * # Role-Based Access Control (RBAC) Module
 *
 * Defines the static role table and the permission matching rules.
 * Two roles exist: `admin` has the full wildcard set including user
 * administration; `almacenero` (warehouse keeper) covers day-to-day
 * warehouse operations but cannot manage users or roles.
 */

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Role definition with associated permissions
#[derive(Debug, Clone)]
pub struct Role {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

lazy_static! {
    pub static ref ROLES: HashMap<String, Role> = {
        let mut roles = HashMap::new();

        // Admin role - has all permissions
        roles.insert(
            "admin".to_string(),
            Role {
                name: "admin".to_string(),
                description: "Administrator with full access".to_string(),
                permissions: vec![
                    "admin:*".to_string(),

                    // User administration
                    "users:*".to_string(),
                    "roles:*".to_string(),

                    // All warehouse resources
                    "products:*".to_string(),
                    "suppliers:*".to_string(),
                    "beneficiaries:*".to_string(),
                    "supply-orders:*".to_string(),
                    "purchase-orders:*".to_string(),
                    "outbound-orders:*".to_string(),
                    "inventory:*".to_string(),
                    "reconciliation:*".to_string(),
                    "dashboard:*".to_string(),
                    "statistics:*".to_string(),
                    "reports:*".to_string(),
                ],
            },
        );

        // Warehouse keeper role - everything except user administration
        roles.insert(
            "almacenero".to_string(),
            Role {
                name: "almacenero".to_string(),
                description: "Warehouse keeper with access to daily operations".to_string(),
                permissions: vec![
                    "products:*".to_string(),
                    "suppliers:read".to_string(),
                    "suppliers:create".to_string(),
                    "suppliers:update".to_string(),
                    "beneficiaries:*".to_string(),
                    "supply-orders:*".to_string(),
                    "purchase-orders:*".to_string(),
                    "outbound-orders:*".to_string(),
                    "inventory:*".to_string(),
                    "reconciliation:*".to_string(),
                    "dashboard:read".to_string(),
                    "statistics:read".to_string(),
                    "reports:read".to_string(),
                ],
            },
        );

        roles
    };
}

/// RBAC service for resolving roles to permissions
#[derive(Clone, Default)]
pub struct RbacService {}

impl RbacService {
    pub fn new() -> Self {
        Self {}
    }

    /// Get a role by name
    pub fn get_role(&self, role_name: &str) -> Option<&Role> {
        ROLES.get(role_name)
    }

    /// Get all permissions for a role
    pub fn get_role_permissions(&self, role_name: &str) -> Vec<String> {
        match ROLES.get(role_name) {
            Some(role) => role.permissions.clone(),
            None => {
                warn!("Role not found: {}", role_name);
                vec![]
            }
        }
    }

    /// Get the union of permissions across several roles
    pub fn get_permissions_for_roles(&self, role_names: &[String]) -> HashSet<String> {
        let mut permissions = HashSet::new();

        for role_name in role_names {
            if let Some(role) = ROLES.get(role_name) {
                for perm in &role.permissions {
                    permissions.insert(perm.clone());
                }
            }
        }

        permissions
    }

    /// Check if a granted permission satisfies a required permission
    pub fn check_permission(&self, user_permission: &str, required_permission: &str) -> bool {
        // Direct match
        if user_permission == required_permission {
            return true;
        }

        // Resource wildcard, e.g. "products:*" grants "products:read"
        if let Some(prefix) = user_permission.strip_suffix(":*") {
            if required_permission
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with(':'))
            {
                return true;
            }
        }

        // Super wildcard
        if user_permission == "*" {
            return true;
        }

        false
    }

    /// Check whether any of the given roles grants the required permission
    pub fn roles_grant(&self, role_names: &[String], required_permission: &str) -> bool {
        self.get_permissions_for_roles(role_names)
            .iter()
            .any(|perm| self.check_permission(perm, required_permission))
    }
}
