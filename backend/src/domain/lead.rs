//! Lead assignments, pricing tiers and credit cost rules.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

/// Maximum number of non-cancelled technicians that may hold one lead.
pub const MAX_PURCHASERS_PER_LEAD: usize = 3;

/// Lead status marking the paid tier.
pub const PAID_LEAD_STATUS: &str = "quoted";

/// Share of the quote price charged in credits for paid-tier leads.
const CREDIT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Lifecycle of a technician's hold on a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentStatus {
    /// Purchased, work not started.
    Assigned,
    /// Work under way.
    InProgress,
    /// Work finished.
    Completed,
    /// Released; does not count towards the purchaser limit.
    Cancelled,
}

impl AssignmentStatus {
    /// Stored representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the assignment counts towards [`MAX_PURCHASERS_PER_LEAD`].
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown assignment status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown assignment status: {0}")]
pub struct ParseAssignmentStatusError(pub String);

impl FromStr for AssignmentStatus {
    type Err = ParseAssignmentStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseAssignmentStatusError(other.to_owned())),
        }
    }
}

/// A technician's purchased hold on a lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadAssignment {
    /// Assignment identifier.
    pub id: Uuid,
    /// Purchased lead.
    pub lead_id: Uuid,
    /// Purchasing technician.
    pub technician_id: Uuid,
    /// Technician display name at purchase time.
    pub technician_name: String,
    /// Current lifecycle status.
    pub status: AssignmentStatus,
    /// Purchase timestamp.
    pub assigned_at: DateTime<Utc>,
}

impl LeadAssignment {
    /// Create a fresh `assigned` row for a purchase.
    pub fn new_purchase(
        lead_id: Uuid,
        technician_id: Uuid,
        technician_name: impl Into<String>,
        assigned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            lead_id,
            technician_id,
            technician_name: technician_name.into(),
            status: AssignmentStatus::Assigned,
            assigned_at,
        }
    }
}

/// Pricing view of a lead used to compute the credit charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadPricing {
    /// Lead identifier.
    pub lead_id: Uuid,
    /// Lead status; [`PAID_LEAD_STATUS`] marks the paid tier.
    pub status: String,
    /// Customer quote in pounds, when one has been issued.
    pub quote_price: Option<Decimal>,
}

impl LeadPricing {
    /// Whether purchasing this lead costs credits.
    pub fn is_paid_tier(&self) -> bool {
        self.status == PAID_LEAD_STATUS
    }

    /// Credits charged to purchase this lead.
    ///
    /// Paid-tier leads cost ten percent of the quote rounded half away from
    /// zero; every other lead, and any lead without a positive quote, is free.
    ///
    /// # Examples
    /// ```
    /// use glasstrade::domain::LeadPricing;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let pricing = LeadPricing {
    ///     lead_id: Uuid::nil(),
    ///     status: "quoted".to_owned(),
    ///     quote_price: Some(Decimal::new(29_999, 2)),
    /// };
    /// assert_eq!(pricing.credit_cost(), 30);
    /// ```
    pub fn credit_cost(&self) -> i64 {
        if !self.is_paid_tier() {
            return 0;
        }
        self.quote_price
            .filter(|price| price.is_sign_positive())
            .map(|price| {
                (price * CREDIT_RATE)
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .to_i64()
                    .unwrap_or(i64::MAX)
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pricing(status: &str, quote: Option<Decimal>) -> LeadPricing {
        LeadPricing {
            lead_id: Uuid::new_v4(),
            status: status.to_owned(),
            quote_price: quote,
        }
    }

    #[rstest]
    #[case(Decimal::new(29_999, 2), 30)]
    #[case(Decimal::new(15_000, 2), 15)]
    #[case(Decimal::new(25, 0), 3)]
    #[case(Decimal::new(24, 0), 2)]
    #[case(Decimal::new(4, 0), 0)]
    #[case(Decimal::ZERO, 0)]
    fn quoted_leads_cost_ten_percent_rounded(#[case] quote: Decimal, #[case] expected: i64) {
        assert_eq!(pricing("quoted", Some(quote)).credit_cost(), expected);
    }

    #[rstest]
    #[case("new")]
    #[case("open")]
    #[case("Quoted")]
    fn other_statuses_are_free(#[case] status: &str) {
        assert_eq!(pricing(status, Some(Decimal::new(29_999, 2))).credit_cost(), 0);
    }

    #[test]
    fn quoted_lead_without_price_is_free() {
        assert_eq!(pricing("quoted", None).credit_cost(), 0);
        assert_eq!(pricing("quoted", Some(Decimal::new(-500, 0))).credit_cost(), 0);
    }

    #[rstest]
    #[case(AssignmentStatus::Assigned)]
    #[case(AssignmentStatus::InProgress)]
    #[case(AssignmentStatus::Completed)]
    #[case(AssignmentStatus::Cancelled)]
    fn status_parses_its_stored_form(#[case] status: AssignmentStatus) {
        assert_eq!(status.as_str().parse::<AssignmentStatus>(), Ok(status));
    }

    #[test]
    fn only_cancelled_assignments_are_inactive() {
        assert!(AssignmentStatus::Assigned.is_active());
        assert!(AssignmentStatus::Completed.is_active());
        assert!(!AssignmentStatus::Cancelled.is_active());
        assert!("refunded".parse::<AssignmentStatus>().is_err());
    }
}
