//! Registration lookup adapter.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_VEHICLE_LOOKUP_TIMEOUT, VehicleLookupHttpSource};
