//! Driving port resolving a registration into priced glass options.

use async_trait::async_trait;

use crate::domain::{Error, GlassPartOption, VehicleSummary, Vrn};

/// Terminal state of one glass resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlassResolution {
    /// The vehicle resolved and the supplier lookup completed (possibly with
    /// no options, or skipped because vehicle attributes were incomplete).
    Resolved {
        /// Vehicle, with primary ARGIC codes set when options exist.
        vehicle: VehicleSummary,
        /// Options in supplier order.
        glass_options: Vec<GlassPartOption>,
    },
    /// The vehicle resolved but the supplier lookup failed; the vehicle is
    /// still returned and the glass option list is empty.
    Partial {
        /// Vehicle without primary ARGIC codes.
        vehicle: VehicleSummary,
        /// Human-readable description of the supplier failure.
        warning: String,
    },
    /// The registration is unknown.
    NotFound,
}

/// Port for the registration → vehicle → glass pipeline.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GlassResolutionQuery: Send + Sync {
    /// Resolve `vrn` into a vehicle and its glass options.
    async fn resolve_glass_for_vrn(&self, vrn: &Vrn) -> Result<GlassResolution, Error>;
}

/// Fixture implementation that knows no vehicles.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureGlassResolutionQuery;

#[async_trait]
impl GlassResolutionQuery for FixtureGlassResolutionQuery {
    async fn resolve_glass_for_vrn(&self, _vrn: &Vrn) -> Result<GlassResolution, Error> {
        Ok(GlassResolution::NotFound)
    }
}
