/*!
 * # Almacén API
 *
 * Warehouse management backend for a charitable institution. Covers the
 * product catalogue, suppliers, supply and purchase orders with
 * human-readable document numbers, outbound distribution to
 * beneficiaries with a stock-movement journal, inventory reconciliation
 * and the dashboard/statistics queries the front office runs.
 *
 * ## Architecture
 *
 * - `entities` — sea-orm models over the deployed Spanish-named schema
 * - `services` — business logic; each service owns a pool handle and an
 *   event sender
 * - `auth` — role-based capability checks for service operations
 * - `events` — domain events published after commits
 * - `migrator` — schema migrations, embedded in the binary
 */

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod migrator;
pub mod services;

pub use config::{init_tracing, load_config, AppConfig};
pub use db::{create_db_pool, establish_connection, run_migrations, DbPool};
pub use errors::{AppError, ServiceError};
pub use events::{process_events, Event, EventSender};
