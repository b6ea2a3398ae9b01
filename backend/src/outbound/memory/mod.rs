//! In-process adapters used without external infrastructure.

mod in_memory_lead_store;

pub use in_memory_lead_store::{DEMO_LEAD_ID, DEMO_TECHNICIAN_ID, InMemoryLeadStore};
