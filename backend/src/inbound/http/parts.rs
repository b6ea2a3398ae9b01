//! Supplier stock API handlers.
//!
//! ```text
//! GET /api/v1/parts/{argicCode}/availability?qty=N  Per-depot availability
//! GET /api/v1/parts/{argicCode}/stock?depot=CODE    Stock search by part code
//! GET /api/v1/depots                                Supplier depot directory
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ArgicCode, DepotAvailability, DepotDirectoryEntry, Error, StockSearchItem};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error};

const ARGIC_CODE: FieldName = FieldName::new("argicCode");
const QTY: FieldName = FieldName::new("qty");

fn parse_argic_code(raw: &str) -> Result<ArgicCode, Error> {
    ArgicCode::parse(raw).map_err(|err| invalid_value_error(ARGIC_CODE, raw, &err.to_string()))
}

/// Query parameters for the availability view.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Quantity required; defaults to 1.
    pub qty: Option<u32>,
}

/// Query parameters for the stock search view.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StockSearchQuery {
    /// Depot code restricting the search.
    pub depot: Option<String>,
}

/// Per-depot availability response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// Always `true`.
    pub success: bool,
    /// One entry per depot reporting stock.
    pub depots: Vec<DepotAvailability>,
    /// Sum of depot quantities.
    pub total_available: u64,
}

/// Stock search response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockSearchResponse {
    /// Always `true`.
    pub success: bool,
    /// Matching stock rows.
    pub items: Vec<StockSearchItem>,
}

/// Depot directory response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepotsResponse {
    /// Always `true`.
    pub success: bool,
    /// Supplier depots.
    pub depots: Vec<DepotDirectoryEntry>,
}

/// Availability of a part across supplier depots, joined with depot
/// contact details.
#[utoipa::path(
    get,
    path = "/api/v1/parts/{argicCode}/availability",
    params(
        ("argicCode" = String, Path, description = "ARGIC part code"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Availability report", body = AvailabilityResponse),
        (status = 400, description = "Invalid part code or quantity", body = ErrorEnvelope),
        (status = 503, description = "Supplier unavailable", body = ErrorEnvelope)
    ),
    tags = ["parts"],
    operation_id = "getPartAvailability"
)]
#[get("/parts/{argic_code}/availability")]
pub async fn get_part_availability(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<AvailabilityQuery>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let argic_code = parse_argic_code(&raw)?;
    let qty = query.into_inner().qty.unwrap_or(1);
    if qty == 0 {
        return Err(invalid_value_error(
            QTY,
            "0",
            "qty must be at least 1",
        ));
    }

    let report = state
        .stock_availability
        .availability(&argic_code, qty)
        .await?;
    Ok(HttpResponse::Ok().json(AvailabilityResponse {
        success: true,
        depots: report.depots,
        total_available: report.total_available,
    }))
}

/// Supplier stock rows for a part, optionally limited to one depot.
#[utoipa::path(
    get,
    path = "/api/v1/parts/{argicCode}/stock",
    params(
        ("argicCode" = String, Path, description = "ARGIC part code"),
        StockSearchQuery
    ),
    responses(
        (status = 200, description = "Stock rows", body = StockSearchResponse),
        (status = 400, description = "Invalid part code", body = ErrorEnvelope),
        (status = 503, description = "Supplier unavailable", body = ErrorEnvelope)
    ),
    tags = ["parts"],
    operation_id = "searchPartStock"
)]
#[get("/parts/{argic_code}/stock")]
pub async fn search_part_stock(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<StockSearchQuery>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let argic_code = parse_argic_code(&raw)?;
    let items = state
        .stock_availability
        .stock_search(&argic_code, query.into_inner().depot)
        .await?;
    Ok(HttpResponse::Ok().json(StockSearchResponse {
        success: true,
        items,
    }))
}

/// Supplier depot directory.
#[utoipa::path(
    get,
    path = "/api/v1/depots",
    responses(
        (status = 200, description = "Depot directory", body = DepotsResponse),
        (status = 503, description = "Supplier unavailable", body = ErrorEnvelope)
    ),
    tags = ["parts"],
    operation_id = "listDepots"
)]
#[get("/depots")]
pub async fn list_depots(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let depots = state.stock_availability.depots().await?;
    Ok(HttpResponse::Ok().json(DepotsResponse {
        success: true,
        depots,
    }))
}
