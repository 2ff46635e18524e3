/*!
 * # Permissions Module
 *
 * Defines the `resource:action` permission strings used by the
 * capability checks. Permissions are organized by resource type.
 */

/// Permission actions
pub struct Actions;

impl Actions {
    pub const READ: &'static str = "read";
    pub const CREATE: &'static str = "create";
    pub const UPDATE: &'static str = "update";
    pub const DELETE: &'static str = "delete";
    pub const MANAGE: &'static str = "manage";
    pub const ALL: &'static str = "*";
}

/// Resource types
pub struct Resources;

impl Resources {
    pub const PRODUCTS: &'static str = "products";
    pub const SUPPLIERS: &'static str = "suppliers";
    pub const BENEFICIARIES: &'static str = "beneficiaries";
    pub const SUPPLY_ORDERS: &'static str = "supply-orders";
    pub const PURCHASE_ORDERS: &'static str = "purchase-orders";
    pub const OUTBOUND_ORDERS: &'static str = "outbound-orders";
    pub const INVENTORY: &'static str = "inventory";
    pub const RECONCILIATION: &'static str = "reconciliation";
    pub const USERS: &'static str = "users";
    pub const ROLES: &'static str = "roles";
    pub const DASHBOARD: &'static str = "dashboard";
    pub const STATISTICS: &'static str = "statistics";
    pub const REPORTS: &'static str = "reports";
    pub const ADMIN: &'static str = "admin";
}

/// Common permission string constants for compile-time safety
pub mod consts {
    // Products
    pub const PRODUCTS_READ: &str = "products:read";
    pub const PRODUCTS_CREATE: &str = "products:create";
    pub const PRODUCTS_UPDATE: &str = "products:update";
    pub const PRODUCTS_DELETE: &str = "products:delete";

    // Inventory
    pub const INVENTORY_READ: &str = "inventory:read";
    pub const INVENTORY_ADJUST: &str = "inventory:adjust";

    // Reconciliation
    pub const RECONCILIATION_READ: &str = "reconciliation:read";
    pub const RECONCILIATION_SUBMIT: &str = "reconciliation:submit";
    pub const RECONCILIATION_CONFIRM: &str = "reconciliation:confirm";

    // Orders
    pub const SUPPLY_ORDERS_READ: &str = "supply-orders:read";
    pub const SUPPLY_ORDERS_CREATE: &str = "supply-orders:create";
    pub const SUPPLY_ORDERS_DELETE: &str = "supply-orders:delete";
    pub const PURCHASE_ORDERS_READ: &str = "purchase-orders:read";
    pub const PURCHASE_ORDERS_CREATE: &str = "purchase-orders:create";
    pub const PURCHASE_ORDERS_DELETE: &str = "purchase-orders:delete";
    pub const OUTBOUND_ORDERS_READ: &str = "outbound-orders:read";
    pub const OUTBOUND_ORDERS_CREATE: &str = "outbound-orders:create";
    pub const OUTBOUND_ORDERS_DELETE: &str = "outbound-orders:delete";

    // Parties
    pub const SUPPLIERS_READ: &str = "suppliers:read";
    pub const SUPPLIERS_CREATE: &str = "suppliers:create";
    pub const SUPPLIERS_UPDATE: &str = "suppliers:update";
    pub const BENEFICIARIES_READ: &str = "beneficiaries:read";
    pub const BENEFICIARIES_CREATE: &str = "beneficiaries:create";

    // User administration
    pub const USERS_READ: &str = "users:read";
    pub const USERS_CREATE: &str = "users:create";
    pub const USERS_UPDATE: &str = "users:update";
    pub const USERS_DELETE: &str = "users:delete";
    pub const ROLES_MANAGE: &str = "roles:manage";

    // Read-only surfaces
    pub const DASHBOARD_READ: &str = "dashboard:read";
    pub const STATISTICS_READ: &str = "statistics:read";
    pub const REPORTS_READ: &str = "reports:read";
}

/// Build a permission string for a resource and action.
pub fn permission_string(resource: &str, action: &str) -> String {
    format!("{}:{}", resource, action)
}
