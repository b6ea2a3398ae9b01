//! Outbound adapters implementing the driven ports.
//!
//! - **supplier**: SOAP client for the glass supplier's stock service
//! - **vehicle**: REST client for registration lookups
//! - **persistence**: PostgreSQL lead store using Diesel
//! - **memory**: in-process lead store for local runs and tests
//!
//! Adapters translate between wire or row formats and domain types; they
//! hold no business rules.

pub mod memory;
pub mod persistence;
pub mod supplier;
pub mod vehicle;
