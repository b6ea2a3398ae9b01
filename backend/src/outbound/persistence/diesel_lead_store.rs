//! PostgreSQL-backed `LeadStore` using Diesel.
//!
//! Reservation runs in one transaction that locks the lead row, so
//! concurrent purchases of the same lead are serialised by PostgreSQL and the
//! purchaser limit holds. Debits are one conditional `UPDATE`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use super::models::{LeadAssignmentRow, LeadPricingRow, NewLeadAssignmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{lead_assignments, leads, technicians};
use crate::domain::ports::{DebitOutcome, LeadStore, LeadStoreError, ReserveOutcome};
use crate::domain::{AssignmentStatus, LeadAssignment, LeadPricing};

/// Diesel implementation of the lead store port.
#[derive(Clone)]
pub struct DieselLeadStore {
    pool: DbPool,
}

impl DieselLeadStore {
    /// Create a store over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LeadStoreError {
    LeadStoreError::connection(error.message())
}

fn map_diesel_error(operation: &'static str, error: DieselError) -> LeadStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(operation, ?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(operation, error = %other, "diesel operation failed"),
    }
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            LeadStoreError::connection("database connection closed")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            LeadStoreError::query(format!("{operation}: referenced row missing"))
        }
        _ => LeadStoreError::query(format!("{operation}: database error")),
    }
}

fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

#[async_trait]
impl LeadStore for DieselLeadStore {
    async fn list_assignments(
        &self,
        lead_id: &Uuid,
    ) -> Result<Vec<LeadAssignment>, LeadStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<LeadAssignmentRow> = lead_assignments::table
            .filter(lead_assignments::lead_id.eq(*lead_id))
            .order(lead_assignments::assigned_at.asc())
            .select(LeadAssignmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error("list assignments", err))?;

        rows.into_iter()
            .map(|row| {
                LeadAssignment::try_from(row).map_err(|err| LeadStoreError::query(err.to_string()))
            })
            .collect()
    }

    async fn reserve_assignment(
        &self,
        assignment: &LeadAssignment,
        capacity: usize,
    ) -> Result<ReserveOutcome, LeadStoreError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let new_row = NewLeadAssignmentRow::from(assignment);
        let lead_id = assignment.lead_id;
        let technician_id = assignment.technician_id;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Result<ReserveOutcome, DieselError> = conn
            .transaction(|conn| {
                async move {
                    // Row lock serialises reservations for this lead until commit.
                    let _locked: Option<Uuid> = leads::table
                        .filter(leads::id.eq(lead_id))
                        .select(leads::id)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;

                    let holders: Vec<(Uuid, String)> = lead_assignments::table
                        .filter(lead_assignments::lead_id.eq(lead_id))
                        .select((lead_assignments::technician_id, lead_assignments::status))
                        .load(conn)
                        .await?;

                    if holders.iter().any(|(holder, _)| *holder == technician_id) {
                        return Ok(ReserveOutcome::AlreadyAssigned);
                    }
                    let active = holders
                        .iter()
                        .filter(|(_, status)| status != AssignmentStatus::Cancelled.as_str())
                        .count();
                    if active >= capacity {
                        return Ok(ReserveOutcome::SoldOut);
                    }

                    diesel::insert_into(lead_assignments::table)
                        .values(&new_row)
                        .execute(conn)
                        .await?;
                    Ok(ReserveOutcome::Reserved)
                }
                .scope_boxed()
            })
            .await;

        match result {
            Err(err) if is_unique_violation(&err) => Ok(ReserveOutcome::AlreadyAssigned),
            other => other.map_err(|err| map_diesel_error("reserve assignment", err)),
        }
    }

    async fn delete_assignment(&self, assignment_id: &Uuid) -> Result<(), LeadStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(lead_assignments::table.find(*assignment_id))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error("delete assignment", err))?;
        Ok(())
    }

    async fn find_lead_pricing(
        &self,
        lead_id: &Uuid,
    ) -> Result<Option<LeadPricing>, LeadStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = leads::table
            .find(*lead_id)
            .select(LeadPricingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error("find lead pricing", err))?;
        Ok(row.map(LeadPricing::from))
    }

    async fn debit_credits(
        &self,
        technician_id: &Uuid,
        amount: i64,
    ) -> Result<DebitOutcome, LeadStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let remaining: Option<i64> = diesel::update(
            technicians::table
                .filter(technicians::id.eq(*technician_id))
                .filter(technicians::credits.ge(amount)),
        )
        .set(technicians::credits.eq(technicians::credits - amount))
        .returning(technicians::credits)
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_diesel_error("debit credits", err))?;

        if let Some(remaining) = remaining {
            return Ok(DebitOutcome::Debited { remaining });
        }

        // Nothing matched: tell a low balance apart from a missing row.
        let balance: Option<i64> = technicians::table
            .find(*technician_id)
            .select(technicians::credits)
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error("read credits", err))?;
        Ok(balance.map_or(DebitOutcome::TechnicianMissing, |balance| {
            DebitOutcome::Insufficient { balance }
        }))
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    use super::*;

    struct Info(&'static str);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info("boom")))
    }

    #[rstest]
    #[case(db_error(DatabaseErrorKind::ClosedConnection), true)]
    #[case(db_error(DatabaseErrorKind::ForeignKeyViolation), false)]
    #[case(db_error(DatabaseErrorKind::SerializationFailure), false)]
    #[case(DieselError::NotFound, false)]
    fn diesel_errors_map_to_port_errors(#[case] error: DieselError, #[case] connection: bool) {
        let mapped = map_diesel_error("test", error);
        assert_eq!(
            matches!(mapped, LeadStoreError::Connection { .. }),
            connection,
            "{mapped:?}"
        );
    }

    #[test]
    fn unique_violation_is_detected() {
        assert!(is_unique_violation(&db_error(DatabaseErrorKind::UniqueViolation)));
        assert!(!is_unique_violation(&DieselError::NotFound));
    }

    #[test]
    fn pool_errors_are_connection_errors() {
        let mapped = map_pool_error(PoolError::Checkout {
            message: "timed out".to_owned(),
        });
        assert_eq!(mapped, LeadStoreError::connection("timed out"));
    }
}
