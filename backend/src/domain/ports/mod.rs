//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`SupplierStockSource`, `VehicleLookup`, `LeadStore`) are
//! implemented by outbound adapters; driving ports (`GlassResolutionQuery`,
//! `LeadPurchaseCommand`, `StockAvailabilityQuery`) are implemented by domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod glass_resolution_query;
mod lead_purchase_command;
mod lead_store;
mod stock_availability_query;
mod supplier_stock_source;
mod vehicle_lookup;

#[cfg(test)]
pub use glass_resolution_query::MockGlassResolutionQuery;
pub use glass_resolution_query::{
    FixtureGlassResolutionQuery, GlassResolution, GlassResolutionQuery,
};
#[cfg(test)]
pub use lead_purchase_command::MockLeadPurchaseCommand;
pub use lead_purchase_command::{
    FixtureLeadPurchaseCommand, LeadPurchaseCommand, PurchaseLeadRequest, PurchaseOutcome,
    PurchaseReceipt, RejectionReason,
};
#[cfg(test)]
pub use lead_store::MockLeadStore;
pub use lead_store::{DebitOutcome, LeadStore, LeadStoreError, ReserveOutcome};
#[cfg(test)]
pub use stock_availability_query::MockStockAvailabilityQuery;
pub use stock_availability_query::{FixtureStockAvailabilityQuery, StockAvailabilityQuery};
#[cfg(test)]
pub use supplier_stock_source::MockSupplierStockSource;
pub use supplier_stock_source::{
    FixtureSupplierStockSource, SupplierStockError, SupplierStockSource, VehicleStockQuery,
};
#[cfg(test)]
pub use vehicle_lookup::MockVehicleLookup;
pub use vehicle_lookup::{
    FixtureVehicleLookup, VehicleLookup, VehicleLookupError, VehicleLookupOutcome,
};
