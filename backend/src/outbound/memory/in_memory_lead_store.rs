//! Mutex-guarded in-process `LeadStore`.
//!
//! Serves local runs without a database and backs HTTP tests. Every port
//! call takes the single lock once, so reservation and debit are atomic in
//! the same way the PostgreSQL adapter's conditional writes are. Foreign keys
//! are not modelled: an assignment may reference a lead the store does not
//! know.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::ports::{DebitOutcome, LeadStore, LeadStoreError, ReserveOutcome};
use crate::domain::{LeadAssignment, LeadPricing, PAID_LEAD_STATUS};

#[derive(Debug, Default)]
struct State {
    leads: HashMap<Uuid, LeadPricing>,
    credits: HashMap<Uuid, i64>,
    assignments: Vec<LeadAssignment>,
}

/// In-memory lead store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeadStore {
    state: Arc<Mutex<State>>,
}

/// Identifier of the seeded demonstration lead.
pub const DEMO_LEAD_ID: Uuid = Uuid::from_u128(0x6c1f_2b7e_0d3a_4c55_9e61_7a8b_1f20_0001);
/// Identifier of the seeded demonstration technician.
pub const DEMO_TECHNICIAN_ID: Uuid = Uuid::from_u128(0x6c1f_2b7e_0d3a_4c55_9e61_7a8b_1f20_0101);

impl InMemoryLeadStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding one quoted lead and one technician with 100 credits.
    pub async fn with_demo_data() -> Self {
        let store = Self::new();
        store
            .insert_lead(LeadPricing {
                lead_id: DEMO_LEAD_ID,
                status: PAID_LEAD_STATUS.to_owned(),
                quote_price: Some(Decimal::new(29_999, 2)),
            })
            .await;
        store.insert_technician(DEMO_TECHNICIAN_ID, 100).await;
        store
    }

    /// Add or replace a lead.
    pub async fn insert_lead(&self, pricing: LeadPricing) {
        self.state.lock().await.leads.insert(pricing.lead_id, pricing);
    }

    /// Add or replace a technician balance.
    pub async fn insert_technician(&self, technician_id: Uuid, credits: i64) {
        self.state.lock().await.credits.insert(technician_id, credits);
    }

    /// Add an assignment without any capacity check.
    pub async fn insert_assignment(&self, assignment: LeadAssignment) {
        self.state.lock().await.assignments.push(assignment);
    }

    /// Current balance of a technician.
    pub async fn credits(&self, technician_id: &Uuid) -> Option<i64> {
        self.state.lock().await.credits.get(technician_id).copied()
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn list_assignments(
        &self,
        lead_id: &Uuid,
    ) -> Result<Vec<LeadAssignment>, LeadStoreError> {
        let state = self.state.lock().await;
        Ok(state
            .assignments
            .iter()
            .filter(|a| a.lead_id == *lead_id)
            .cloned()
            .collect())
    }

    async fn reserve_assignment(
        &self,
        assignment: &LeadAssignment,
        capacity: usize,
    ) -> Result<ReserveOutcome, LeadStoreError> {
        let mut state = self.state.lock().await;
        let held = state
            .assignments
            .iter()
            .filter(|a| a.lead_id == assignment.lead_id);
        let mut active = 0;
        for existing in held {
            if existing.technician_id == assignment.technician_id {
                return Ok(ReserveOutcome::AlreadyAssigned);
            }
            if existing.status.is_active() {
                active += 1;
            }
        }
        if active >= capacity {
            return Ok(ReserveOutcome::SoldOut);
        }
        state.assignments.push(assignment.clone());
        Ok(ReserveOutcome::Reserved)
    }

    async fn delete_assignment(&self, assignment_id: &Uuid) -> Result<(), LeadStoreError> {
        self.state
            .lock()
            .await
            .assignments
            .retain(|a| a.id != *assignment_id);
        Ok(())
    }

    async fn find_lead_pricing(
        &self,
        lead_id: &Uuid,
    ) -> Result<Option<LeadPricing>, LeadStoreError> {
        Ok(self.state.lock().await.leads.get(lead_id).cloned())
    }

    async fn debit_credits(
        &self,
        technician_id: &Uuid,
        amount: i64,
    ) -> Result<DebitOutcome, LeadStoreError> {
        let mut state = self.state.lock().await;
        let Some(balance) = state.credits.get_mut(technician_id) else {
            return Ok(DebitOutcome::TechnicianMissing);
        };
        if *balance < amount {
            return Ok(DebitOutcome::Insufficient { balance: *balance });
        }
        *balance -= amount;
        Ok(DebitOutcome::Debited {
            remaining: *balance,
        })
    }
}
