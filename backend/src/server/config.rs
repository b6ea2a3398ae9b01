//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use glasstrade::outbound::persistence::DbPool;
use glasstrade::outbound::supplier::SupplierClientConfig;
use url::Url;

/// Registration lookup endpoint details.
#[derive(Debug, Clone)]
pub struct VehicleLookupConfig {
    pub(crate) base_url: Url,
    pub(crate) api_key: String,
    pub(crate) timeout: Duration,
}

impl VehicleLookupConfig {
    /// Bundle the lookup endpoint, key and timeout.
    #[must_use]
    pub fn new(base_url: Url, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            timeout,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) supplier: SupplierClientConfig,
    pub(crate) vehicle_lookup: VehicleLookupConfig,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration for the external APIs.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        supplier: SupplierClientConfig,
        vehicle_lookup: VehicleLookupConfig,
    ) -> Self {
        Self {
            bind_addr,
            supplier,
            vehicle_lookup,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the lead store.
    ///
    /// Without a pool the server purchases leads against the in-memory
    /// store seeded with demo data.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
