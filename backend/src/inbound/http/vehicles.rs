//! Vehicle glass resolution API handler.
//!
//! ```text
//! GET /api/v1/vehicles/{vrn}/glass  Resolve a registration into glass options
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::GlassResolution;
use crate::domain::{Error, GlassPartOption, VehicleSummary, Vrn};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error};

const VRN: FieldName = FieldName::new("vrn");

/// Glass resolution response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleGlassResponse {
    /// Always `true`.
    pub success: bool,
    /// Resolved vehicle.
    pub vehicle: VehicleSummary,
    /// Glass options in supplier order.
    pub glass_options: Vec<GlassPartOption>,
    /// `true` when the supplier lookup failed and only the vehicle is known.
    pub partial: bool,
    /// Supplier failure description for partial results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl VehicleGlassResponse {
    fn from_resolution(resolution: GlassResolution) -> Option<Self> {
        match resolution {
            GlassResolution::Resolved {
                vehicle,
                glass_options,
            } => Some(Self {
                success: true,
                vehicle,
                glass_options,
                partial: false,
                warning: None,
            }),
            GlassResolution::Partial { vehicle, warning } => Some(Self {
                success: true,
                vehicle,
                glass_options: Vec::new(),
                partial: true,
                warning: Some(warning),
            }),
            GlassResolution::NotFound => None,
        }
    }
}

/// Resolve a vehicle registration into priced glass options.
///
/// A supplier failure still returns the vehicle, flagged as partial.
#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{vrn}/glass",
    params(("vrn" = String, Path, description = "Vehicle registration number")),
    responses(
        (status = 200, description = "Vehicle resolved", body = VehicleGlassResponse),
        (status = 400, description = "Malformed registration", body = ErrorEnvelope),
        (status = 404, description = "Registration not found", body = ErrorEnvelope),
        (status = 503, description = "Vehicle lookup unavailable", body = ErrorEnvelope)
    ),
    tags = ["vehicles"],
    operation_id = "getVehicleGlass"
)]
#[get("/vehicles/{vrn}/glass")]
pub async fn get_vehicle_glass(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let vrn = Vrn::parse(&raw).map_err(|err| invalid_value_error(VRN, &raw, &err.to_string()))?;

    let resolution = state.glass_resolution.resolve_glass_for_vrn(&vrn).await?;
    VehicleGlassResponse::from_resolution(resolution)
        .map(|body| HttpResponse::Ok().json(body))
        .ok_or_else(|| Error::not_found(format!("vehicle {vrn} not found")))
}
