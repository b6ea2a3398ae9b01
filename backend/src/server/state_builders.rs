//! Builders for HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use glasstrade::domain::ports::{GlassResolutionQuery, LeadPurchaseCommand, StockAvailabilityQuery};
use glasstrade::domain::{GlassResolutionService, LeadPurchaseService, StockAvailabilityService};
use glasstrade::inbound::http::state::HttpState;
use glasstrade::outbound::memory::InMemoryLeadStore;
use glasstrade::outbound::persistence::{DbPool, DieselLeadStore};
use glasstrade::outbound::supplier::SupplierSoapSource;
use glasstrade::outbound::vehicle::VehicleLookupHttpSource;

use super::ServerConfig;

/// Select the lead store: Diesel when a pool is configured, otherwise the
/// in-memory store seeded with the demo lead and technician.
async fn build_lead_purchase(pool: Option<&DbPool>) -> Arc<dyn LeadPurchaseCommand> {
    match pool {
        Some(pool) => Arc::new(LeadPurchaseService::new(Arc::new(DieselLeadStore::new(
            pool.clone(),
        )))),
        None => {
            warn!("no database configured; lead purchases use the in-memory demo store");
            Arc::new(LeadPurchaseService::new(Arc::new(
                InMemoryLeadStore::with_demo_data().await,
            )))
        }
    }
}

/// Build the shared HTTP state from the configured adapters.
///
/// # Errors
/// Returns [`std::io::Error`] when an HTTP client cannot be constructed.
pub(super) async fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let supplier = Arc::new(
        SupplierSoapSource::new(config.supplier.clone())
            .map_err(|err| std::io::Error::other(format!("supplier client: {err}")))?,
    );
    let lookup = &config.vehicle_lookup;
    let vehicles = Arc::new(
        VehicleLookupHttpSource::new(lookup.base_url.clone(), lookup.api_key.clone(), lookup.timeout)
            .map_err(|err| std::io::Error::other(format!("vehicle lookup client: {err}")))?,
    );
    info!(
        supplier_endpoint = %config.supplier.endpoint,
        vehicle_lookup = %lookup.base_url,
        database = config.db_pool.is_some(),
        "adapters configured"
    );

    let glass_resolution: Arc<dyn GlassResolutionQuery> =
        Arc::new(GlassResolutionService::new(vehicles, supplier.clone()));
    let stock_availability: Arc<dyn StockAvailabilityQuery> =
        Arc::new(StockAvailabilityService::new(supplier));
    let lead_purchase = build_lead_purchase(config.db_pool.as_ref()).await;

    Ok(web::Data::new(HttpState::new(
        glass_resolution,
        lead_purchase,
        stock_availability,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glasstrade::domain::ports::{PurchaseLeadRequest, PurchaseOutcome, RejectionReason};
    use glasstrade::outbound::memory::{DEMO_LEAD_ID, DEMO_TECHNICIAN_ID};
    use rstest::rstest;

    fn demo_request() -> PurchaseLeadRequest {
        PurchaseLeadRequest {
            lead_id: DEMO_LEAD_ID,
            technician_id: DEMO_TECHNICIAN_ID,
            technician_name: "Demo Technician".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn db_pool_absent_uses_seeded_in_memory_store() {
        let purchase = build_lead_purchase(None).await;

        let first = purchase.purchase(demo_request()).await.expect("purchase");
        let PurchaseOutcome::Purchased(receipt) = first else {
            panic!("expected purchase, got {first:?}");
        };
        assert_eq!(receipt.credits_deducted, 30);

        let second = purchase.purchase(demo_request()).await.expect("purchase");
        assert_eq!(
            second,
            PurchaseOutcome::Rejected(RejectionReason::AlreadyPurchased)
        );
    }
}
