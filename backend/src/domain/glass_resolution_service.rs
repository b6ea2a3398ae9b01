//! Registration → vehicle → glass resolution pipeline.
//!
//! The vehicle result is the more valuable half: a supplier failure degrades
//! the answer to [`GlassResolution::Partial`] instead of discarding the
//! vehicle.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::demo_fixture::{demo_glass_options, demo_vehicle, is_demo_vrn};
use crate::domain::ports::{
    GlassResolution, GlassResolutionQuery, SupplierStockError, SupplierStockSource, VehicleLookup,
    VehicleLookupError, VehicleLookupOutcome, VehicleStockQuery,
};
use crate::domain::{Error, Vrn};

/// Glass resolution service implementing [`GlassResolutionQuery`].
#[derive(Clone)]
pub struct GlassResolutionService<V, S> {
    vehicles: Arc<V>,
    supplier: Arc<S>,
}

impl<V, S> GlassResolutionService<V, S> {
    /// Create a service over the given vehicle lookup and supplier source.
    pub fn new(vehicles: Arc<V>, supplier: Arc<S>) -> Self {
        Self { vehicles, supplier }
    }
}

fn map_vehicle_error(vrn: &Vrn, error: VehicleLookupError) -> Error {
    warn!(vrn = %vrn, error = %error, "vehicle lookup failed");
    Error::service_unavailable("vehicle lookup unavailable")
}

/// Client-facing summary of a supplier failure. Body previews and transport
/// messages stay in the logs.
fn partial_warning(error: &SupplierStockError) -> String {
    match error {
        SupplierStockError::Timeout { .. } => "supplier timeout".to_owned(),
        SupplierStockError::HttpStatus { status, .. } => {
            format!("supplier returned HTTP {status}")
        }
        SupplierStockError::Transport { .. } => "supplier unavailable".to_owned(),
        SupplierStockError::Fault { status } => format!("supplier reported failure: {status}"),
        SupplierStockError::InvalidRequest { .. } => "supplier request invalid".to_owned(),
    }
}

fn demo_resolution(vrn: &Vrn) -> GlassResolution {
    let glass_options = demo_glass_options();
    let vehicle = demo_vehicle(vrn, glass_options.first());
    GlassResolution::Resolved {
        vehicle,
        glass_options,
    }
}

#[async_trait]
impl<V, S> GlassResolutionQuery for GlassResolutionService<V, S>
where
    V: VehicleLookup,
    S: SupplierStockSource,
{
    async fn resolve_glass_for_vrn(&self, vrn: &Vrn) -> Result<GlassResolution, Error> {
        if is_demo_vrn(vrn) {
            info!(vrn = %vrn, "serving demonstration resolution");
            return Ok(demo_resolution(vrn));
        }

        let vehicle = match self
            .vehicles
            .resolve(vrn)
            .await
            .map_err(|err| map_vehicle_error(vrn, err))?
        {
            VehicleLookupOutcome::Found(vehicle) => vehicle,
            VehicleLookupOutcome::NotFound => {
                info!(vrn = %vrn, "registration not found");
                return Ok(GlassResolution::NotFound);
            }
        };

        let Some(query) = vehicle
            .stock_lookup_attributes()
            .map(|attrs| VehicleStockQuery {
                make: attrs.make.to_owned(),
                model: attrs.model.to_owned(),
                year: attrs.year,
                model_type: None,
            })
        else {
            debug!(vrn = %vrn, "vehicle attributes incomplete; skipping glass lookup");
            return Ok(GlassResolution::Resolved {
                vehicle,
                glass_options: Vec::new(),
            });
        };

        match self.supplier.stock_by_vehicle(&query).await {
            Ok(glass_options) => {
                debug!(vrn = %vrn, options = glass_options.len(), "glass options resolved");
                let vehicle = match glass_options.first() {
                    Some(primary) => vehicle.with_primary_glass(primary),
                    None => vehicle,
                };
                Ok(GlassResolution::Resolved {
                    vehicle,
                    glass_options,
                })
            }
            Err(err) => {
                warn!(vrn = %vrn, error = %err, "glass lookup failed; returning vehicle only");
                Ok(GlassResolution::Partial {
                    vehicle,
                    warning: partial_warning(&err),
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "glass_resolution_service_tests.rs"]
mod tests;
