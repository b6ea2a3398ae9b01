//! Lead purchase transaction.
//!
//! Steps run strictly in order. The assignment insert is the first durable
//! side effect; every failure after it deletes that assignment before
//! returning. Capacity and balance are enforced by conditional writes in the
//! store, so the pre-insert reads only short-circuit the common refusals.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    DebitOutcome, LeadPurchaseCommand, LeadStore, LeadStoreError, PurchaseLeadRequest,
    PurchaseOutcome, PurchaseReceipt, RejectionReason, ReserveOutcome,
};
use crate::domain::{Error, LeadAssignment, MAX_PURCHASERS_PER_LEAD};

/// Reason reported when existing assignments cannot be read.
pub const FETCH_ASSIGNMENTS_FAILED: &str = "could not fetch assignments";
/// Reason reported when the assignment insert fails.
pub const CREATE_ASSIGNMENT_FAILED: &str = "could not create assignment";
/// Reason reported when the lead's pricing cannot be read.
pub const FETCH_LEAD_FAILED: &str = "could not fetch lead";
/// Reason reported when the technician's balance cannot be read.
pub const FETCH_CREDITS_FAILED: &str = "could not fetch technician credits";
/// Reason reported when the debit write fails.
pub const DEBIT_FAILED: &str = "debit failed";

/// Lead purchase service implementing [`LeadPurchaseCommand`].
#[derive(Clone)]
pub struct LeadPurchaseService<L> {
    store: Arc<L>,
}

impl<L> LeadPurchaseService<L> {
    /// Create a service over the given store.
    pub fn new(store: Arc<L>) -> Self {
        Self { store }
    }
}

fn store_failure(reason: &'static str, error: &LeadStoreError) -> Error {
    error!(reason, error = %error, "lead store call failed");
    match error {
        LeadStoreError::Connection { .. } => Error::service_unavailable(reason),
        LeadStoreError::Query { .. } => Error::internal(reason),
    }
}

fn rejected(request: &PurchaseLeadRequest, reason: RejectionReason) -> PurchaseOutcome {
    info!(
        lead_id = %request.lead_id,
        technician_id = %request.technician_id,
        reason = reason.reason(),
        "lead purchase rejected"
    );
    PurchaseOutcome::Rejected(reason)
}

impl<L> LeadPurchaseService<L>
where
    L: LeadStore,
{
    /// Best-effort removal of an assignment created by this purchase.
    async fn compensate(&self, assignment: &LeadAssignment) {
        match self.store.delete_assignment(&assignment.id).await {
            Ok(()) => debug!(
                lead_id = %assignment.lead_id,
                assignment_id = %assignment.id,
                "assignment compensated"
            ),
            Err(err) => error!(
                lead_id = %assignment.lead_id,
                assignment_id = %assignment.id,
                error = %err,
                "compensating delete failed; assignment left for reconciliation"
            ),
        }
    }

    /// Pre-insert guard over the current assignments.
    async fn precheck(&self, request: &PurchaseLeadRequest) -> Result<Option<RejectionReason>, Error> {
        let existing = self
            .store
            .list_assignments(&request.lead_id)
            .await
            .map_err(|err| store_failure(FETCH_ASSIGNMENTS_FAILED, &err))?;

        if existing
            .iter()
            .any(|assignment| assignment.technician_id == request.technician_id)
        {
            return Ok(Some(RejectionReason::AlreadyPurchased));
        }
        let active = existing
            .iter()
            .filter(|assignment| assignment.status.is_active())
            .count();
        if active >= MAX_PURCHASERS_PER_LEAD {
            return Ok(Some(RejectionReason::SoldOut));
        }
        Ok(None)
    }

    /// Charge the lead's credit cost once the assignment exists.
    async fn charge(
        &self,
        request: &PurchaseLeadRequest,
        assignment: &LeadAssignment,
    ) -> Result<Result<i64, RejectionReason>, Error> {
        let pricing = match self.store.find_lead_pricing(&request.lead_id).await {
            Ok(Some(pricing)) => pricing,
            Ok(None) => {
                warn!(lead_id = %request.lead_id, "lead missing after assignment insert");
                self.compensate(assignment).await;
                return Err(Error::internal(FETCH_LEAD_FAILED));
            }
            Err(err) => {
                let failure = store_failure(FETCH_LEAD_FAILED, &err);
                self.compensate(assignment).await;
                return Err(failure);
            }
        };

        let cost = pricing.credit_cost();
        if cost == 0 {
            return Ok(Ok(0));
        }

        match self.store.debit_credits(&request.technician_id, cost).await {
            Ok(DebitOutcome::Debited { remaining }) => {
                info!(
                    technician_id = %request.technician_id,
                    cost,
                    remaining,
                    "credits debited"
                );
                Ok(Ok(cost))
            }
            Ok(DebitOutcome::Insufficient { balance }) => {
                debug!(technician_id = %request.technician_id, cost, balance, "balance too low");
                self.compensate(assignment).await;
                Ok(Err(RejectionReason::InsufficientCredits))
            }
            Ok(DebitOutcome::TechnicianMissing) => {
                warn!(technician_id = %request.technician_id, "technician record missing");
                self.compensate(assignment).await;
                Err(Error::internal(FETCH_CREDITS_FAILED))
            }
            Err(err) => {
                let failure = store_failure(DEBIT_FAILED, &err);
                self.compensate(assignment).await;
                Err(failure)
            }
        }
    }
}

#[async_trait]
impl<L> LeadPurchaseCommand for LeadPurchaseService<L>
where
    L: LeadStore,
{
    async fn purchase(&self, request: PurchaseLeadRequest) -> Result<PurchaseOutcome, Error> {
        if let Some(reason) = self.precheck(&request).await? {
            return Ok(rejected(&request, reason));
        }

        let assignment = LeadAssignment::new_purchase(
            request.lead_id,
            request.technician_id,
            request.technician_name.clone(),
            Utc::now(),
        );
        match self
            .store
            .reserve_assignment(&assignment, MAX_PURCHASERS_PER_LEAD)
            .await
        {
            Ok(ReserveOutcome::Reserved) => {}
            Ok(ReserveOutcome::AlreadyAssigned) => {
                return Ok(rejected(&request, RejectionReason::AlreadyPurchased));
            }
            Ok(ReserveOutcome::SoldOut) => {
                return Ok(rejected(&request, RejectionReason::SoldOut));
            }
            Err(err) => return Err(store_failure(CREATE_ASSIGNMENT_FAILED, &err)),
        }

        match self.charge(&request, &assignment).await? {
            Ok(credits_deducted) => {
                info!(
                    lead_id = %request.lead_id,
                    technician_id = %request.technician_id,
                    assignment_id = %assignment.id,
                    credits_deducted,
                    "lead purchased"
                );
                Ok(PurchaseOutcome::Purchased(PurchaseReceipt {
                    assignment_id: assignment.id,
                    credits_deducted,
                }))
            }
            Err(reason) => Ok(rejected(&request, reason)),
        }
    }
}

#[cfg(test)]
#[path = "lead_purchase_service_tests.rs"]
mod tests;
