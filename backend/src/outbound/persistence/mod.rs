//! PostgreSQL persistence for leads, assignments and credits.
//!
//! Row structs and table definitions stay private to this module; the
//! domain only sees the `LeadStore` port.
//!
//! ```ignore
//! use glasstrade::outbound::persistence::{DbPool, DieselLeadStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/glasstrade")).await?;
//! let store = DieselLeadStore::new(pool);
//! ```

mod diesel_lead_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_lead_store::DieselLeadStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
