//! Depot availability aggregation and supplier stock views.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{StockAvailabilityQuery, SupplierStockError, SupplierStockSource};
use crate::domain::{
    ArgicCode, DepotAvailabilityReport, DepotDirectoryEntry, Error, StockSearchItem,
};

/// Stock availability service implementing [`StockAvailabilityQuery`].
#[derive(Clone)]
pub struct StockAvailabilityService<S> {
    supplier: Arc<S>,
}

impl<S> StockAvailabilityService<S> {
    /// Create a service over the given supplier source.
    pub fn new(supplier: Arc<S>) -> Self {
        Self { supplier }
    }
}

fn map_supplier_error(operation: &'static str, error: SupplierStockError) -> Error {
    warn!(operation, error = %error, "supplier call failed");
    match error {
        SupplierStockError::InvalidRequest { message } => Error::invalid_request(message),
        _ => Error::service_unavailable("supplier unavailable"),
    }
}

#[async_trait]
impl<S> StockAvailabilityQuery for StockAvailabilityService<S>
where
    S: SupplierStockSource,
{
    async fn availability(
        &self,
        argic_code: &ArgicCode,
        qty: u32,
    ) -> Result<DepotAvailabilityReport, Error> {
        let (directory, branches) = tokio::join!(
            self.supplier.get_depots(),
            self.supplier.get_branch_availability(argic_code, qty),
        );

        let branches =
            branches.map_err(|err| map_supplier_error("getBranchAvailability", err))?;
        // Branch rows still carry quantities without the directory.
        let directory = directory.unwrap_or_else(|err| {
            warn!(
                argic_code = %argic_code,
                error = %err,
                "depot directory unavailable; depot details defaulted"
            );
            Vec::new()
        });

        let report = DepotAvailabilityReport::join(directory, branches);
        debug!(
            argic_code = %argic_code,
            qty,
            depots = report.depots.len(),
            total_available = report.total_available,
            "availability aggregated"
        );
        Ok(report)
    }

    async fn depots(&self) -> Result<Vec<DepotDirectoryEntry>, Error> {
        self.supplier
            .get_depots()
            .await
            .map_err(|err| map_supplier_error("GetDepots", err))
    }

    async fn stock_search(
        &self,
        argic_code: &ArgicCode,
        depot: Option<String>,
    ) -> Result<Vec<StockSearchItem>, Error> {
        let depot = depot
            .map(|code| code.trim().to_ascii_uppercase())
            .filter(|code| !code.is_empty());
        self.supplier
            .stock_search_by_argic(argic_code, depot)
            .await
            .map_err(|err| map_supplier_error("StockSearch", err))
    }
}
