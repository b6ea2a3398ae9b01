//! Driving port for supplier stock views: per-depot availability, the depot
//! directory and stock search by part code.

use async_trait::async_trait;

use crate::domain::{
    ArgicCode, DepotAvailabilityReport, DepotDirectoryEntry, Error, StockSearchItem,
};

/// Port for stock-check views.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockAvailabilityQuery: Send + Sync {
    /// Availability of `argic_code` for an order of `qty`, joined with depot
    /// contact details.
    async fn availability(
        &self,
        argic_code: &ArgicCode,
        qty: u32,
    ) -> Result<DepotAvailabilityReport, Error>;

    /// The supplier's depot directory.
    async fn depots(&self) -> Result<Vec<DepotDirectoryEntry>, Error>;

    /// Stock rows for `argic_code`, optionally limited to one depot.
    async fn stock_search(
        &self,
        argic_code: &ArgicCode,
        depot: Option<String>,
    ) -> Result<Vec<StockSearchItem>, Error>;
}

/// Fixture implementation reporting no stock.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureStockAvailabilityQuery;

#[async_trait]
impl StockAvailabilityQuery for FixtureStockAvailabilityQuery {
    async fn availability(
        &self,
        _argic_code: &ArgicCode,
        _qty: u32,
    ) -> Result<DepotAvailabilityReport, Error> {
        Ok(DepotAvailabilityReport::default())
    }

    async fn depots(&self) -> Result<Vec<DepotDirectoryEntry>, Error> {
        Ok(Vec::new())
    }

    async fn stock_search(
        &self,
        _argic_code: &ArgicCode,
        _depot: Option<String>,
    ) -> Result<Vec<StockSearchItem>, Error> {
        Ok(Vec::new())
    }
}
