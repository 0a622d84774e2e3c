//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Adapters implement the domain ports over `diesel-async` connections drawn
//! from a `bb8` pool. They only translate between rows and domain types:
//!
//! - row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module;
//! - every Diesel or pool failure is mapped into the port's own error enum.
//!
//! ```ignore
//! use sharefood::outbound::persistence::{DbPool, DieselRequestLog, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/sharefood")).await?;
//! let requests = DieselRequestLog::new(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_request_log;
mod diesel_stock_ledger;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_request_log::DieselRequestLog;
pub use diesel_stock_ledger::DieselStockLedger;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
