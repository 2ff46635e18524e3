/*!
 * # Service Layer
 *
 * Business logic for the warehouse: catalogue maintenance, document
 * numbering, stock movements, order flows and reporting. Services own
 * an `Arc<DbPool>` and an `Arc<EventSender>` and emit domain events
 * after their transaction commits.
 */

pub mod beneficiaries;
pub mod dashboard;
pub mod numbering;
pub mod order_lines;
pub mod outbound_orders;
pub mod products;
pub mod purchase_orders;
pub mod reconciliation;
pub mod statistics;
pub mod stock;
pub mod suppliers;
pub mod supply_orders;
pub mod users;

pub use beneficiaries::{BeneficiaryInput, BeneficiaryService};
pub use dashboard::{DashboardData, DashboardService};
pub use numbering::{next_document_number, DocumentStore};
pub use order_lines::OrderLineInput;
pub use outbound_orders::{DispatchInput, OutboundOrderService};
pub use products::{InventoryStatistics, ProductInput, ProductService};
pub use purchase_orders::{PurchaseOrderInput, PurchaseOrderService};
pub use reconciliation::{NewReconciliation, ReconciliationService};
pub use statistics::{DeliveryStatistics, StatisticsService};
pub use stock::StockChange;
pub use suppliers::{SupplierInput, SupplierService};
pub use supply_orders::{SupplyOrderInput, SupplyOrderService};
pub use users::{NewUser, UserService, UserUpdate};
