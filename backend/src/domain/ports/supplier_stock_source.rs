//! Driven port for the glass supplier's stock and depot operations.
//!
//! The supplier is called once per invocation and never retried here: some
//! supplier operations sit next to stock reservation and are not guaranteed
//! idempotent, so retry policy belongs to the caller.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{
    ArgicCode, BranchStock, DepotDirectoryEntry, GlassPartOption, StockSearchItem,
};

/// Vehicle attributes used to list glass stock for a vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleStockQuery {
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Year of manufacture.
    pub year: u16,
    /// Optional model variant understood by the supplier.
    pub model_type: Option<String>,
}

define_port_error! {
    /// Errors surfaced while calling the supplier.
    pub enum SupplierStockError {
        /// The call exceeded the client-side timeout.
        Timeout { message: String } =>
            "supplier timeout: {message}",
        /// The supplier answered with a non-success HTTP status.
        HttpStatus { status: u16, message: String } =>
            "supplier returned HTTP {status}: {message}",
        /// Network transport failed before a response was read.
        Transport { message: String } =>
            "supplier transport failed: {message}",
        /// The supplier answered with a SOAP fault or a failing call status.
        Fault { status: String } =>
            "supplier reported failure: {status}",
        /// A required parameter was missing; the call was not attempted.
        InvalidRequest { message: String } =>
            "supplier request invalid: {message}",
    }
}

/// Port for supplier stock, price and depot queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupplierStockSource: Send + Sync {
    /// List every depot in the supplier's directory.
    async fn get_depots(&self) -> Result<Vec<DepotDirectoryEntry>, SupplierStockError>;

    /// Per-branch quantity and price of `argic_code` for an order of `qty`.
    async fn get_branch_availability(
        &self,
        argic_code: &ArgicCode,
        qty: u32,
    ) -> Result<Vec<BranchStock>, SupplierStockError>;

    /// Stock rows for `argic_code`, optionally limited to one depot.
    async fn stock_search_by_argic(
        &self,
        argic_code: &ArgicCode,
        depot: Option<String>,
    ) -> Result<Vec<StockSearchItem>, SupplierStockError>;

    /// Priced glass options listed for a vehicle.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use glasstrade::domain::ports::{
    ///     FixtureSupplierStockSource, SupplierStockSource, VehicleStockQuery,
    /// };
    ///
    /// let options = FixtureSupplierStockSource
    ///     .stock_by_vehicle(&VehicleStockQuery {
    ///         make: "FORD".to_owned(),
    ///         model: "FOCUS".to_owned(),
    ///         year: 2015,
    ///         model_type: None,
    ///     })
    ///     .await?;
    /// assert!(options.is_empty());
    /// # Ok::<(), glasstrade::domain::ports::SupplierStockError>(())
    /// ```
    async fn stock_by_vehicle(
        &self,
        query: &VehicleStockQuery,
    ) -> Result<Vec<GlassPartOption>, SupplierStockError>;
}

/// Fixture implementation reporting no stock and no depots.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSupplierStockSource;

#[async_trait]
impl SupplierStockSource for FixtureSupplierStockSource {
    async fn get_depots(&self) -> Result<Vec<DepotDirectoryEntry>, SupplierStockError> {
        Ok(Vec::new())
    }

    async fn get_branch_availability(
        &self,
        _argic_code: &ArgicCode,
        _qty: u32,
    ) -> Result<Vec<BranchStock>, SupplierStockError> {
        Ok(Vec::new())
    }

    async fn stock_search_by_argic(
        &self,
        _argic_code: &ArgicCode,
        _depot: Option<String>,
    ) -> Result<Vec<StockSearchItem>, SupplierStockError> {
        Ok(Vec::new())
    }

    async fn stock_by_vehicle(
        &self,
        _query: &VehicleStockQuery,
    ) -> Result<Vec<GlassPartOption>, SupplierStockError> {
        Ok(Vec::new())
    }
}
