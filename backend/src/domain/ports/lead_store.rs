//! Driven port for the lead, assignment and credit row store.
//!
//! Capacity and balance checks are conditional writes inside the store so
//! concurrent purchases cannot overbook a lead or overdraw a balance.

use async_trait::async_trait;
use uuid::Uuid;

use super::define_port_error;
use crate::domain::{LeadAssignment, LeadPricing};

/// Result of a conditional assignment insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveOutcome {
    /// The assignment row was inserted.
    Reserved,
    /// The technician already holds an assignment for the lead.
    AlreadyAssigned,
    /// The lead already has the maximum number of active assignments.
    SoldOut,
}

/// Result of a conditional credit debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOutcome {
    /// The balance was debited; `remaining` is the new balance.
    Debited {
        /// Balance after the debit.
        remaining: i64,
    },
    /// The balance is below the requested amount; nothing was written.
    Insufficient {
        /// Balance observed by the conditional update.
        balance: i64,
    },
    /// No technician row exists for the identifier.
    TechnicianMissing,
}

define_port_error! {
    /// Errors raised by lead store adapters.
    pub enum LeadStoreError {
        /// The store could not be reached.
        Connection { message: String } =>
            "lead store connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "lead store query failed: {message}",
    }
}

/// Port for lead assignment and credit persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Every assignment recorded for `lead_id`, cancelled ones included.
    async fn list_assignments(&self, lead_id: &Uuid)
    -> Result<Vec<LeadAssignment>, LeadStoreError>;

    /// Insert `assignment` unless its technician already holds the lead or
    /// the lead already has `capacity` active assignments.
    async fn reserve_assignment(
        &self,
        assignment: &LeadAssignment,
        capacity: usize,
    ) -> Result<ReserveOutcome, LeadStoreError>;

    /// Remove an assignment row. Deleting a missing row is not an error.
    async fn delete_assignment(&self, assignment_id: &Uuid) -> Result<(), LeadStoreError>;

    /// Pricing view of a lead, or `None` when the lead does not exist.
    async fn find_lead_pricing(&self, lead_id: &Uuid)
    -> Result<Option<LeadPricing>, LeadStoreError>;

    /// Subtract `amount` from the technician's balance only when the balance
    /// covers it.
    async fn debit_credits(
        &self,
        technician_id: &Uuid,
        amount: i64,
    ) -> Result<DebitOutcome, LeadStoreError>;
}
