//! Driven port for the vehicle registration lookup service.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{VehicleSummary, Vrn};

/// Result of a registration lookup.
///
/// The upstream service answers "no data" with a success status, so a plate
/// it does not know is a normal outcome rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleLookupOutcome {
    /// The registration resolved to a vehicle.
    Found(VehicleSummary),
    /// The registration is unknown to the lookup service.
    NotFound,
}

define_port_error! {
    /// Errors surfaced while calling the registration lookup service.
    pub enum VehicleLookupError {
        /// Network transport failed or the service returned a failure status.
        Transport { message: String } =>
            "vehicle lookup transport failed: {message}",
        /// The call exceeded the client-side timeout.
        Timeout { message: String } =>
            "vehicle lookup timeout: {message}",
        /// The response body was not JSON.
        Decode { message: String } =>
            "vehicle lookup response decode failed: {message}",
    }
}

/// Port resolving a registration into vehicle attributes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleLookup: Send + Sync {
    /// Resolve `vrn` into a vehicle summary.
    async fn resolve(&self, vrn: &Vrn) -> Result<VehicleLookupOutcome, VehicleLookupError>;
}

/// Fixture implementation that knows no vehicles.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureVehicleLookup;

#[async_trait]
impl VehicleLookup for FixtureVehicleLookup {
    async fn resolve(&self, _vrn: &Vrn) -> Result<VehicleLookupOutcome, VehicleLookupError> {
        Ok(VehicleLookupOutcome::NotFound)
    }
}
