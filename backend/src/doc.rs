//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the response schemas they reference. The generated document backs
//! Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{
    DepotAddress, DepotAvailability, DepotDirectoryEntry, GlassPartOption, StockSearchItem,
    VehicleSummary,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::leads::{PurchaseLeadBody, PurchaseLeadResponse};
use crate::inbound::http::parts::{AvailabilityResponse, DepotsResponse, StockSearchResponse};
use crate::inbound::http::vehicles::VehicleGlassResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Glasstrade backend API",
        description = "Vehicle glass resolution, supplier stock views and lead purchasing."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::leads::purchase_lead,
        crate::inbound::http::vehicles::get_vehicle_glass,
        crate::inbound::http::parts::get_part_availability,
        crate::inbound::http::parts::search_part_stock,
        crate::inbound::http::parts::list_depots,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorEnvelope,
        PurchaseLeadBody,
        PurchaseLeadResponse,
        VehicleGlassResponse,
        VehicleSummary,
        GlassPartOption,
        AvailabilityResponse,
        DepotAvailability,
        DepotAddress,
        DepotDirectoryEntry,
        DepotsResponse,
        StockSearchResponse,
        StockSearchItem,
    )),
    tags(
        (name = "leads", description = "Lead purchasing"),
        (name = "vehicles", description = "Registration to glass resolution"),
        (name = "parts", description = "Supplier stock and depots"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
