//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod leads;
pub mod parts;
pub mod state;
pub(crate) mod validation;
pub mod vehicles;

pub use error::ApiResult;

/// Register the `/api/v1` scope with its extractor error handlers.
///
/// The caller supplies `web::Data<HttpState>`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use glasstrade::inbound::http::{configure_api, state::HttpState};
///
/// let app = App::new()
///     .app_data(web::Data::new(HttpState::fixtures()))
///     .configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(error::json_config())
            .app_data(error::query_config())
            .app_data(error::path_config())
            .service(leads::purchase_lead)
            .service(vehicles::get_vehicle_glass)
            .service(parts::get_part_availability)
            .service(parts::search_part_stock)
            .service(parts::list_depots),
    );
}
