//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureGlassResolutionQuery, FixtureLeadPurchaseCommand, FixtureStockAvailabilityQuery,
    GlassResolutionQuery, LeadPurchaseCommand, StockAvailabilityQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub glass_resolution: Arc<dyn GlassResolutionQuery>,
    pub lead_purchase: Arc<dyn LeadPurchaseCommand>,
    pub stock_availability: Arc<dyn StockAvailabilityQuery>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use glasstrade::domain::ports::{
    ///     FixtureGlassResolutionQuery, FixtureLeadPurchaseCommand, FixtureStockAvailabilityQuery,
    /// };
    /// use glasstrade::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureGlassResolutionQuery),
    ///     Arc::new(FixtureLeadPurchaseCommand),
    ///     Arc::new(FixtureStockAvailabilityQuery),
    /// );
    /// let _purchase = state.lead_purchase.clone();
    /// ```
    pub fn new(
        glass_resolution: Arc<dyn GlassResolutionQuery>,
        lead_purchase: Arc<dyn LeadPurchaseCommand>,
        stock_availability: Arc<dyn StockAvailabilityQuery>,
    ) -> Self {
        Self {
            glass_resolution,
            lead_purchase,
            stock_availability,
        }
    }

    /// State backed entirely by fixtures.
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureGlassResolutionQuery),
            Arc::new(FixtureLeadPurchaseCommand),
            Arc::new(FixtureStockAvailabilityQuery),
        )
    }

    /// Replace the glass resolution port.
    #[must_use]
    pub fn with_glass_resolution(mut self, port: Arc<dyn GlassResolutionQuery>) -> Self {
        self.glass_resolution = port;
        self
    }

    /// Replace the lead purchase port.
    #[must_use]
    pub fn with_lead_purchase(mut self, port: Arc<dyn LeadPurchaseCommand>) -> Self {
        self.lead_purchase = port;
        self
    }

    /// Replace the stock availability port.
    #[must_use]
    pub fn with_stock_availability(mut self, port: Arc<dyn StockAvailabilityQuery>) -> Self {
        self.stock_availability = port;
        self
    }
}
