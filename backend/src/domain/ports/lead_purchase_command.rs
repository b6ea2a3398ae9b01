//! Driving port for purchasing access to a lead.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;

/// Purchase request issued by a technician.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseLeadRequest {
    /// Lead being purchased.
    pub lead_id: Uuid,
    /// Purchasing technician.
    pub technician_id: Uuid,
    /// Technician display name recorded on the assignment.
    pub technician_name: String,
}

/// Successful purchase details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseReceipt {
    /// Created assignment.
    pub assignment_id: Uuid,
    /// Credits debited; zero for leads outside the paid tier.
    pub credits_deducted: i64,
}

/// Business-rule refusals. None of them leave a side effect behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// The technician already holds this lead.
    AlreadyPurchased,
    /// The lead has reached its purchaser limit.
    SoldOut,
    /// The technician's balance does not cover the credit cost.
    InsufficientCredits,
}

impl RejectionReason {
    /// Human-readable reason returned to callers.
    pub const fn reason(self) -> &'static str {
        match self {
            Self::AlreadyPurchased => "already purchased",
            Self::SoldOut => "sold out",
            Self::InsufficientCredits => "insufficient credits",
        }
    }

    /// Stable machine-readable identifier.
    pub const fn code(self) -> &'static str {
        match self {
            Self::AlreadyPurchased => "already_purchased",
            Self::SoldOut => "sold_out",
            Self::InsufficientCredits => "insufficient_credits",
        }
    }
}

/// Outcome of a purchase that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The assignment exists and any credit cost was debited.
    Purchased(PurchaseReceipt),
    /// The purchase was refused.
    Rejected(RejectionReason),
}

/// Port for the lead purchase transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadPurchaseCommand: Send + Sync {
    /// Purchase a lead for a technician.
    ///
    /// Infrastructure failures after the assignment insert are returned as
    /// [`Error`] once the assignment has been compensated.
    async fn purchase(&self, request: PurchaseLeadRequest) -> Result<PurchaseOutcome, Error>;
}

/// Fixture implementation accepting every purchase free of charge.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureLeadPurchaseCommand;

#[async_trait]
impl LeadPurchaseCommand for FixtureLeadPurchaseCommand {
    async fn purchase(&self, _request: PurchaseLeadRequest) -> Result<PurchaseOutcome, Error> {
        Ok(PurchaseOutcome::Purchased(PurchaseReceipt {
            assignment_id: Uuid::nil(),
            credits_deducted: 0,
        }))
    }
}
