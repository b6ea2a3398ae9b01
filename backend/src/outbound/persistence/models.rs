//! Diesel row structs. Internal to the persistence adapter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::schema::{lead_assignments, leads};
use crate::domain::{LeadAssignment, LeadPricing, ParseAssignmentStatusError};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lead_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LeadAssignmentRow {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub technician_id: Uuid,
    pub technician_name: String,
    pub status: String,
    pub assigned_at: DateTime<Utc>,
}

impl TryFrom<LeadAssignmentRow> for LeadAssignment {
    type Error = ParseAssignmentStatusError;

    fn try_from(row: LeadAssignmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            lead_id: row.lead_id,
            technician_id: row.technician_id,
            technician_name: row.technician_name,
            status: row.status.parse()?,
            assigned_at: row.assigned_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lead_assignments)]
pub(crate) struct NewLeadAssignmentRow<'a> {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub technician_id: Uuid,
    pub technician_name: &'a str,
    pub status: &'static str,
    pub assigned_at: DateTime<Utc>,
}

impl<'a> From<&'a LeadAssignment> for NewLeadAssignmentRow<'a> {
    fn from(assignment: &'a LeadAssignment) -> Self {
        Self {
            id: assignment.id,
            lead_id: assignment.lead_id,
            technician_id: assignment.technician_id,
            technician_name: &assignment.technician_name,
            status: assignment.status.as_str(),
            assigned_at: assignment.assigned_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = leads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LeadPricingRow {
    pub id: Uuid,
    pub status: String,
    pub quote_price: Option<Decimal>,
}

impl From<LeadPricingRow> for LeadPricing {
    fn from(row: LeadPricingRow) -> Self {
        Self {
            lead_id: row.id,
            status: row.status,
            quote_price: row.quote_price,
        }
    }
}
