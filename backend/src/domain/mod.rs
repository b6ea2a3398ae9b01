//! Domain primitives, services and ports.
//!
//! Purpose: hold the vehicle, glass, depot and lead types shared by every
//! adapter, together with the services that implement the driving ports.
//! Nothing here knows about HTTP, SOAP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Vrn, VehicleSummary: registration and resolved vehicle.
//! - ArgicCode, GlassPartOption, StockSearchItem: supplier glass parts.
//! - DepotDirectoryEntry, BranchStock, DepotAvailabilityReport: depot views.
//! - LeadAssignment, LeadPricing: purchase records and credit pricing.
//! - GlassResolutionService, LeadPurchaseService, StockAvailabilityService.

pub mod demo_fixture;
pub mod depot;
pub mod error;
pub mod glass;
pub mod glass_resolution_service;
pub mod lead;
pub mod lead_purchase_service;
pub mod ports;
pub mod stock_availability_service;
pub mod trace_id;
pub mod vehicle;

pub use self::depot::{
    BranchStock, DepotAddress, DepotAvailability, DepotAvailabilityReport, DepotDirectoryEntry,
    UNKNOWN_DEPOT_NAME,
};
pub use self::error::{DomainError, Error, ErrorCode};
pub use self::glass::{
    ArgicCode, ArgicCodeValidationError, GlassPartOption, SHORT_ARGIC_LEN, StockSearchItem,
    short_code_of,
};
pub use self::glass_resolution_service::GlassResolutionService;
pub use self::lead::{
    AssignmentStatus, LeadAssignment, LeadPricing, MAX_PURCHASERS_PER_LEAD, PAID_LEAD_STATUS,
    ParseAssignmentStatusError,
};
pub use self::lead_purchase_service::LeadPurchaseService;
pub use self::stock_availability_service::StockAvailabilityService;
pub use self::trace_id::TraceId;
pub use self::vehicle::{StockLookupAttributes, VehicleSummary, Vrn, VrnValidationError};
